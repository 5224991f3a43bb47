use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::languages::Language;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Low and fixed so repeated translations of the same text stay stable and
/// literal rather than creative.
const TRANSLATION_TEMPERATURE: f64 = 0.2;

/// Why a translation call produced no text.
///
/// Failures never propagate past the handler as failed requests (the
/// classifier renders them into the reply), but they stay typed here so
/// tests and logs can tell the cases apart.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("ANTHROPIC_API_KEY is not configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Anthropic API {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed API response: {0}")]
    MalformedResponse(String),
}

// ── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────

/// Client for the Anthropic Messages API, specialized to one-shot
/// translation requests. Single attempt, no retries, bounded timeout.
#[derive(Clone)]
pub struct Translator {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl Translator {
    pub fn new(
        api_key: Option<String>,
        model: String,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build reqwest client");
        Self {
            client,
            api_url: ANTHROPIC_API_URL.to_string(),
            api_key,
            model,
            max_tokens,
        }
    }

    /// Point the client at a different endpoint. Used by tests to run
    /// against a local stub server.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    fn prompt(text: &str, target: Language) -> String {
        format!(
            "Translate the following text into {}. \
             Reply with only the translation, nothing else.\n\n{}",
            target.display_name(),
            text
        )
    }

    /// Translate `text` into `target`. Returns the backend's trimmed text
    /// content, or a [`TranslateError`] after exactly one attempt.
    pub async fn translate(
        &self,
        text: &str,
        target: Language,
    ) -> Result<String, TranslateError> {
        let api_key = self.api_key.as_deref().ok_or(TranslateError::MissingApiKey)?;

        let request_body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: TRANSLATION_TEMPERATURE,
            messages: vec![serde_json::json!({
                "role": "user",
                "content": Self::prompt(text, target),
            })],
        };

        let resp = self
            .client
            .post(&self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TranslateError::Api { status, body });
        }

        let body = resp.text().await?;
        let parsed: MessagesResponse = serde_json::from_str(&body)
            .map_err(|e| TranslateError::MalformedResponse(e.to_string()))?;

        parsed
            .content
            .iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text.as_deref())
            .map(|t| t.trim().to_string())
            .ok_or_else(|| {
                TranslateError::MalformedResponse("no text content block".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator(api_key: Option<&str>) -> Translator {
        Translator::new(
            api_key.map(str::to_string),
            "claude-sonnet-4-6".to_string(),
            1024,
            Duration::from_secs(30),
        )
    }

    #[test]
    fn prompt_embeds_display_name_and_literal_text() {
        let prompt = Translator::prompt("xin chào", Language::Kr);
        assert!(prompt.contains("into Korean"));
        assert!(prompt.ends_with("xin chào"));
    }

    #[test]
    fn request_body_carries_model_and_temperature() {
        let req = MessagesRequest {
            model: "claude-sonnet-4-6",
            max_tokens: 1024,
            temperature: TRANSLATION_TEMPERATURE,
            messages: vec![serde_json::json!({"role": "user", "content": "hi"})],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "claude-sonnet-4-6");
        assert_eq!(json["max_tokens"], 1024);
        assert_eq!(json["temperature"], 0.2);
        assert_eq!(json["messages"][0]["role"], "user");
        // Non-streaming: no `stream` field on the wire.
        assert!(json.get("stream").is_none());
    }

    #[tokio::test]
    async fn missing_api_key_is_a_typed_error() {
        let result = translator(None).translate("hello", Language::Vi).await;
        assert!(matches!(result, Err(TranslateError::MissingApiKey)));
    }

    #[test]
    fn error_messages_are_user_presentable() {
        assert_eq!(
            TranslateError::MissingApiKey.to_string(),
            "ANTHROPIC_API_KEY is not configured"
        );
        assert_eq!(
            TranslateError::MalformedResponse("no text content block".to_string())
                .to_string(),
            "malformed API response: no text content block"
        );
    }

    #[test]
    fn response_parsing_picks_first_text_block() {
        let body = r#"{
            "content": [
                {"type": "thinking", "thinking": "…"},
                {"type": "text", "text": "  안녕하세요  "}
            ]
        }"#;
        let parsed: MessagesResponse = serde_json::from_str(body).unwrap();
        let text = parsed
            .content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
            .unwrap();
        assert_eq!(text.trim(), "안녕하세요");
    }

    #[test]
    fn client_is_clone() {
        let original = translator(Some("key"));
        let cloned = original.clone();
        assert_eq!(cloned.model, original.model);
        assert_eq!(cloned.api_url, ANTHROPIC_API_URL);
    }
}
