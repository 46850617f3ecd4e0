//! Delegated strategy backed by the `OpenAI` Responses API

use super::error::{BotError, UpstreamError};
use super::types::ChatMessage;
use super::Bot;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed system instruction prepended to every delegated request.
pub const SYSTEM_PROMPT: &str = "You are a helpful and polite hospital helpline assistant. \
Your job is to answer questions about hospital services, appointments, visiting hours, \
and departments. If the user describes a medical emergency, immediately tell them to \
call 108 or visit the nearest emergency room. Always remind users that you are not a \
doctor and cannot give professional medical advice.";

/// Reply when the upstream call succeeds but yields no extractable text.
/// Distinguishes "service reachable but empty" from "service unreachable".
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "(No response text received.)";

/// Completion-service strategy: one outbound call per invocation, no
/// retries, no caching.
pub struct OpenAiBot {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiBot {
    pub fn new(api_key: String, model: String, gateway: Option<&str>) -> Self {
        let base_url = match gateway {
            Some(gw) => format!("{}/v1/responses", gw.trim_end_matches('/')),
            None => "https://api.openai.com/v1/responses".to_string(),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    fn translate_request(&self, history: &[ChatMessage]) -> ResponsesRequest {
        let mut input = Vec::with_capacity(history.len() + 1);
        input.push(InputMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        });
        input.extend(history.iter().map(|m| InputMessage {
            role: m.role.as_str().to_string(),
            content: m.content.clone(),
        }));

        ResponsesRequest {
            model: self.model.clone(),
            input,
        }
    }

    /// Three-tier extraction: primary `output_text`, else the first output
    /// item's first content element, else the fixed placeholder.
    fn extract_reply(resp: &ResponsesResponse) -> String {
        let primary = resp
            .output_text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let fallback = || {
            resp.output
                .first()
                .and_then(|item| item.content.first())
                .and_then(|c| c.text.as_deref())
                .map(str::trim)
                .filter(|t| !t.is_empty())
        };

        primary
            .or_else(fallback)
            .map_or_else(|| EMPTY_RESPONSE_PLACEHOLDER.to_string(), str::to_string)
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> UpstreamError {
        // Prefer the message from the error envelope when it parses
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map_or_else(|_| body.to_string(), |e| e.error.message);

        match status.as_u16() {
            401 | 403 => UpstreamError::auth(format!("Authentication failed: {message}")),
            429 => UpstreamError::rate_limit(format!("Rate limit exceeded: {message}")),
            400 => UpstreamError::invalid_request(format!("Invalid request: {message}")),
            500..=599 => UpstreamError::server_error(format!("Server error: {message}")),
            _ => UpstreamError::unknown(format!("HTTP {status}: {message}")),
        }
    }
}

#[async_trait]
impl Bot for OpenAiBot {
    async fn reply(&self, history: &[ChatMessage]) -> Result<String, BotError> {
        if history.is_empty() {
            return Err(BotError::Validation(
                "messages must not be empty".to_string(),
            ));
        }

        let request = self.translate_request(history);

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    UpstreamError::network(format!("Connection failed: {e}"))
                } else {
                    UpstreamError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body).into());
        }

        let parsed: ResponsesResponse = serde_json::from_str(&body).map_err(|e| {
            UpstreamError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        Ok(Self::extract_reply(&parsed))
    }

    fn name(&self) -> &str {
        &self.model
    }
}

// Responses API types

#[derive(Debug, Serialize)]
struct ResponsesRequest {
    model: String,
    input: Vec<InputMessage>,
}

#[derive(Debug, Serialize)]
struct InputMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ResponsesResponse {
    /// Merged convenience field; not every deployment populates it
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<OutputContent>,
}

#[derive(Debug, Deserialize)]
struct OutputContent {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::error::UpstreamErrorKind;
    use crate::bot::types::Role;

    fn parse(json: &str) -> ResponsesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_extract_primary_text() {
        let resp = parse(r#"{"output_text":"  Hello from the helpline.  ","output":[]}"#);
        assert_eq!(OpenAiBot::extract_reply(&resp), "Hello from the helpline.");
    }

    #[test]
    fn test_extract_falls_back_to_output_items() {
        let resp = parse(r#"{"output":[{"content":[{"text":"fallback text"}]}]}"#);
        assert_eq!(OpenAiBot::extract_reply(&resp), "fallback text");
    }

    #[test]
    fn test_extract_primary_wins_over_fallback() {
        let resp =
            parse(r#"{"output_text":"primary","output":[{"content":[{"text":"fallback"}]}]}"#);
        assert_eq!(OpenAiBot::extract_reply(&resp), "primary");
    }

    #[test]
    fn test_extract_empty_everywhere_gets_placeholder() {
        let resp = parse(r#"{"output_text":"","output":[{"content":[{"text":"  "}]}]}"#);
        assert_eq!(OpenAiBot::extract_reply(&resp), EMPTY_RESPONSE_PLACEHOLDER);

        let resp = parse("{}");
        assert_eq!(OpenAiBot::extract_reply(&resp), EMPTY_RESPONSE_PLACEHOLDER);
    }

    #[test]
    fn test_translate_request_prepends_system_prompt() {
        let bot = OpenAiBot::new("key".to_string(), "gpt-4o-mini".to_string(), None);
        let history = vec![
            ChatMessage::new(Role::User, "hello"),
            ChatMessage::new(Role::Assistant, "hi, how can I help?"),
            ChatMessage::new(Role::User, "visiting hours?"),
        ];

        let request = bot.translate_request(&history);

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.input.len(), 4);
        assert_eq!(request.input[0].role, "system");
        assert_eq!(request.input[0].content, SYSTEM_PROMPT);
        assert_eq!(request.input[1].role, "user");
        assert_eq!(request.input[2].role, "assistant");
        assert_eq!(request.input[3].content, "visiting hours?");
    }

    #[test]
    fn test_base_url_with_and_without_gateway() {
        let direct = OpenAiBot::new("key".to_string(), "gpt-4o-mini".to_string(), None);
        assert_eq!(direct.base_url, "https://api.openai.com/v1/responses");

        let proxied = OpenAiBot::new(
            "key".to_string(),
            "gpt-4o-mini".to_string(),
            Some("https://gateway.example/"),
        );
        assert_eq!(proxied.base_url, "https://gateway.example/v1/responses");
    }

    #[test]
    fn test_classify_error_by_status() {
        let err = OpenAiBot::classify_error(
            reqwest::StatusCode::UNAUTHORIZED,
            r#"{"error":{"message":"bad key"}}"#,
        );
        assert_eq!(err.kind, UpstreamErrorKind::Auth);
        assert!(err.message.contains("bad key"));

        let err = OpenAiBot::classify_error(
            reqwest::StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"message":"slow down"}}"#,
        );
        assert_eq!(err.kind, UpstreamErrorKind::RateLimit);

        let err = OpenAiBot::classify_error(reqwest::StatusCode::BAD_GATEWAY, "oops");
        assert_eq!(err.kind, UpstreamErrorKind::ServerError);
        assert!(err.message.contains("oops"));
    }

    #[tokio::test]
    async fn test_empty_history_is_a_validation_error() {
        let bot = OpenAiBot::new("key".to_string(), "gpt-4o-mini".to_string(), None);
        let result = bot.reply(&[]).await;
        assert!(matches!(result, Err(BotError::Validation(_))));
    }
}
