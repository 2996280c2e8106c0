use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstuaryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No sources configured")]
    NoSources,

    #[error("All {0} sources failed on the initial refresh")]
    EmptyRefresh(usize),
}

pub type Result<T> = std::result::Result<T, EstuaryError>;
