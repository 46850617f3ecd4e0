//! Response strategies for the helpline chat endpoint
//!
//! Two interchangeable implementations of one seam: an offline rule table
//! and a delegated call to an external completion service.

mod error;
mod openai;
mod rules;
mod types;

#[cfg(test)]
mod proptests;

pub use error::{BotError, UpstreamError, UpstreamErrorKind};
pub use openai::{OpenAiBot, EMPTY_RESPONSE_PLACEHOLDER, SYSTEM_PROMPT};
pub use rules::{reply_to, RuleBot};
pub use types::{ChatMessage, Role};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for response strategies
#[async_trait]
pub trait Bot: Send + Sync {
    /// Produce a reply to the given conversation history
    async fn reply(&self, history: &[ChatMessage]) -> Result<String, BotError>;

    /// Short strategy identifier for logging
    fn name(&self) -> &str;
}

/// Logging wrapper for response strategies
pub struct LoggingBot {
    inner: Arc<dyn Bot>,
    name: String,
}

impl LoggingBot {
    pub fn new(inner: Arc<dyn Bot>) -> Self {
        let name = inner.name().to_string();
        Self { inner, name }
    }
}

#[async_trait]
impl Bot for LoggingBot {
    async fn reply(&self, history: &[ChatMessage]) -> Result<String, BotError> {
        let start = std::time::Instant::now();
        let result = self.inner.reply(history).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    strategy = %self.name,
                    duration_ms = %duration.as_millis(),
                    history_len = history.len(),
                    reply_len = reply.len(),
                    "Reply generated"
                );
            }
            Err(BotError::Validation(message)) => {
                tracing::warn!(strategy = %self.name, %message, "Rejected invalid history");
            }
            Err(BotError::Upstream(e)) => {
                tracing::error!(
                    strategy = %self.name,
                    duration_ms = %duration.as_millis(),
                    kind = e.kind.as_str(),
                    error = %e.message,
                    "Upstream completion call failed"
                );
            }
        }

        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_bot_passes_through() {
        let bot = LoggingBot::new(Arc::new(RuleBot));
        assert_eq!(bot.name(), "rules");

        let history = vec![ChatMessage::new(Role::User, "hello")];
        let reply = bot.reply(&history).await.unwrap();
        assert_eq!(reply, reply_to("hello"));
    }
}
