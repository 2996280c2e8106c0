use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::app::{EstuaryError, Result};
use crate::fetcher::Fetcher;

/// Some feeds reject default client identities, so requests carry a
/// desktop-browser User-Agent.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118.0.0.0 Safari/537.36";

const RETRYABLE_STATUS: [StatusCode; 5] = [
    StatusCode::TOO_MANY_REQUESTS,
    StatusCode::INTERNAL_SERVER_ERROR,
    StatusCode::BAD_GATEWAY,
    StatusCode::SERVICE_UNAVAILABLE,
    StatusCode::GATEWAY_TIMEOUT,
];

/// Retry schedule for transient failures: capped exponential backoff.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self::with_policy(timeout, RetryPolicy::default())
    }

    pub fn with_policy(timeout: Duration, mut policy: RetryPolicy) -> Self {
        policy.max_attempts = policy.max_attempts.max(1);
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, policy }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut delay = self.policy.base_delay;

        for attempt in 1..=self.policy.max_attempts {
            let last = attempt == self.policy.max_attempts;

            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response.bytes().await?.to_vec());
                    }
                    if last || !RETRYABLE_STATUS.contains(&status) {
                        return Err(EstuaryError::Status {
                            url: url.to_string(),
                            status,
                        });
                    }
                    tracing::debug!(url, %status, attempt, "transient status, retrying");
                }
                Err(err) => {
                    // Transport failures (timeouts, resets) are transient.
                    if last {
                        return Err(err.into());
                    }
                    tracing::debug!(url, error = %err, attempt, "request failed, retrying");
                }
            }

            tokio::time::sleep(delay).await;
            delay = (delay * 2).min(self.policy.max_delay);
        }

        unreachable!("retry loop always returns on the last attempt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_fetcher() -> HttpFetcher {
        HttpFetcher::with_policy(
            Duration::from_secs(5),
            RetryPolicy {
                max_attempts: 3,
                base_delay: Duration::from_millis(10),
                max_delay: Duration::from_millis(40),
            },
        )
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"<rss/>".to_vec()))
            .mount(&server)
            .await;

        let body = fast_fetcher()
            .fetch(&format!("{}/feed.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, b"<rss/>");
    }

    #[tokio::test]
    async fn test_retries_transient_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ok".to_vec()))
            .mount(&server)
            .await;

        let body = fast_fetcher()
            .fetch(&format!("{}/feed.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, b"ok");
    }

    #[tokio::test]
    async fn test_no_retry_on_permanent_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing.xml"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = fast_fetcher()
            .fetch(&format!("{}/missing.xml", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EstuaryError::Status {
                status: StatusCode::NOT_FOUND,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.xml"))
            .respond_with(ResponseTemplate::new(500))
            .expect(3)
            .mount(&server)
            .await;

        let err = fast_fetcher()
            .fetch(&format!("{}/feed.xml", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, EstuaryError::Status { .. }));
    }
}
