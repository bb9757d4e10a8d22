//! Gemini API transport.
//!
//! Thin blocking HTTP client for the generativelanguage endpoint. The
//! transport owns escaping (via JSON serialization), authentication and
//! timeouts; it hands the raw response body to the extractor untouched
//! and propagates HTTP failures unmodified. No retries.

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::ApiConfig;

/// Blocking client for `models/<model>:generateContent`.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from the `[api]` config section.
    ///
    /// The API key comes from the config file or the `GEMINI_API_KEY`
    /// environment variable, in that order.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let api_key = config.resolve_api_key().context(
            "No API key configured. Set api_key in ~/.config/cca/config.toml \
             or export GEMINI_API_KEY.",
        )?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Request body for a single-prompt generateContent call.
    pub fn build_request_body(prompt: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{
                    "text": prompt
                }]
            }]
        })
    }

    /// Full endpoint URL, without the key query parameter.
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Send a prompt and return the raw response body.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let endpoint = self.endpoint();
        debug!(%endpoint, prompt_len = prompt.len(), "sending generateContent request");

        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::build_request_body(prompt))
            .send()
            .with_context(|| format!("Request to {} failed", endpoint))?;

        let status = response.status();
        let body = response.text().context("Failed to read response body")?;

        if !status.is_success() {
            bail!(
                "API call failed with status code: {}\nError details: {}",
                status.as_u16(),
                body
            );
        }

        debug!(status = status.as_u16(), body_len = body.len(), "received response");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(key: Option<&str>) -> ApiConfig {
        ApiConfig {
            model: "gemini-2.0-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout_secs: 60,
            api_key: key.map(String::from),
        }
    }

    #[test]
    fn request_body_shape() {
        let body = GeminiClient::build_request_body("analyze this");

        assert_eq!(
            body,
            json!({"contents": [{"parts": [{"text": "analyze this"}]}]})
        );
    }

    #[test]
    fn request_body_escapes_via_serialization() {
        let prompt = "line one\nhe said \"hi\"\tC:\\path";
        let body = GeminiClient::build_request_body(prompt);
        let serialized = serde_json::to_string(&body).unwrap();

        assert!(serialized.contains(r#"line one\nhe said \"hi\"\tC:\\path"#));

        // Round-trip: the wire form decodes back to the original prompt.
        let reparsed: Value = serde_json::from_str(&serialized).unwrap();
        assert_eq!(reparsed["contents"][0]["parts"][0]["text"], prompt);
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::from_config(&test_config(Some("k"))).unwrap();

        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let mut config = test_config(Some("k"));
        config.base_url.push('/');
        let client = GeminiClient::from_config(&config).unwrap();

        assert!(!client.endpoint().contains("//models"));
    }

    #[test]
    fn from_config_uses_configured_key() {
        let client = GeminiClient::from_config(&test_config(Some("secret")));
        assert!(client.is_ok());
    }
}
