//! Best-effort text translation for the presentation layer.
//!
//! Uses the public Google Translate endpoint and parses its nested-array
//! response. Failures of any kind fall back to the original text; callers
//! never see an error. Results are memoized in a bounded cache.

use reqwest::Client;
use tokio::sync::Mutex;

use crate::app::Result;
use crate::memo::BoundedMemo;

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Upstream rejects longer inputs.
const MAX_INPUT_CHARS: usize = 4500;

const CACHE_CAPACITY: usize = 512;

pub struct Translator {
    client: Client,
    endpoint: String,
    cache: Mutex<BoundedMemo<(String, String), String>>,
}

impl Translator {
    pub fn new(client: Client) -> Self {
        Self::with_endpoint(client, ENDPOINT)
    }

    fn with_endpoint(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            cache: Mutex::new(BoundedMemo::new(CACHE_CAPACITY)),
        }
    }

    /// Translate `text` into `target_lang`, returning the original text
    /// unchanged when translation fails or produces nothing.
    pub async fn translate(&self, text: &str, target_lang: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }

        let key = (text.to_string(), target_lang.to_string());
        if let Some(cached) = self.cache.lock().await.get(&key) {
            return cached;
        }

        let truncated: String = text.chars().take(MAX_INPUT_CHARS).collect();
        match self.request(&truncated, target_lang).await {
            Ok(translated) if !translated.is_empty() => {
                self.cache.lock().await.insert(key, translated.clone());
                translated
            }
            Ok(_) => text.to_string(),
            Err(err) => {
                tracing::debug!(error = %err, target_lang, "translation failed, keeping original");
                text.to_string()
            }
        }
    }

    async fn request(&self, text: &str, target_lang: &str) -> Result<String> {
        let params = [
            ("client", "gtx"),
            ("sl", "auto"),
            ("tl", target_lang),
            ("dt", "t"),
            ("q", text),
        ];

        let response = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        // Response shape: [[["translated", "original", ...], ...], ...]
        let value: serde_json::Value = response.json().await?;

        let mut out = String::new();
        if let Some(sentences) = value.get(0).and_then(|v| v.as_array()) {
            for sentence in sentences {
                if let Some(fragment) = sentence.get(0).and_then(|v| v.as_str()) {
                    out.push_str(fragment);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn translator(server_uri: &str) -> Translator {
        Translator::with_endpoint(Client::new(), format!("{}/translate_a/single", server_uri))
    }

    #[tokio::test]
    async fn test_translates_and_joins_sentences() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .and(query_param("tl", "ru"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                [["Привет, ", "Hello, ", null], ["мир", "world", null]]
            ])))
            .mount(&server)
            .await;

        let result = translator(&server.uri()).translate("Hello, world", "ru").await;
        assert_eq!(result, "Привет, мир");
    }

    #[tokio::test]
    async fn test_failure_returns_original() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = translator(&server.uri()).translate("Hello", "ru").await;
        assert_eq!(result, "Hello");
    }

    #[tokio::test]
    async fn test_empty_response_returns_original() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[]])))
            .mount(&server)
            .await;

        let result = translator(&server.uri()).translate("Hello", "ru").await;
        assert_eq!(result, "Hello");
    }

    #[tokio::test]
    async fn test_empty_input_short_circuits() {
        let server = MockServer::start().await;
        let result = translator(&server.uri()).translate("   ", "ru").await;
        assert_eq!(result, "");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memoizes_successful_translations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_a/single"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                [["Привет", "Hello", null]]
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let translator = translator(&server.uri());
        let first = translator.translate("Hello", "ru").await;
        let second = translator.translate("Hello", "ru").await;
        assert_eq!(first, second);
    }
}
