//! Process configuration
//!
//! Read once at startup from the environment; behaviorally inert beyond
//! port selection and strategy choice.

/// Which response strategy serves the chat endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotMode {
    /// Offline keyword matching, no network
    Offline,
    /// Delegate to the external completion service
    Assistant,
}

/// Configuration for the helpline process
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub port: u16,
    /// Explicit strategy override (`HELPLINE_MODE`)
    pub mode: Option<BotMode>,
    pub openai_api_key: Option<String>,
    /// Base-URL override for proxied deployments (e.g. an LLM gateway)
    pub gateway: Option<String>,
    pub model: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("HELPLINE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let mode = std::env::var("HELPLINE_MODE")
            .ok()
            .and_then(|m| match m.to_lowercase().as_str() {
                "offline" | "rules" => Some(BotMode::Offline),
                "assistant" | "llm" => Some(BotMode::Assistant),
                _ => {
                    tracing::warn!(value = %m, "Unrecognized HELPLINE_MODE, ignoring");
                    None
                }
            });

        Self {
            port,
            mode,
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            gateway: std::env::var("LLM_GATEWAY").ok(),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        }
    }

    /// Strategy selection: explicit override first, otherwise delegate
    /// whenever a credential or gateway is configured.
    pub fn resolved_mode(&self) -> BotMode {
        if let Some(mode) = self.mode {
            return mode;
        }
        if self.openai_api_key.is_some() || self.gateway.is_some() {
            BotMode::Assistant
        } else {
            BotMode::Offline
        }
    }

    /// API key handed to the delegated strategy. In gateway mode the
    /// gateway handles the actual authentication.
    pub fn upstream_api_key(&self) -> String {
        match &self.openai_api_key {
            Some(key) => key.clone(),
            None => "implicit".to_string(),
        }
    }
}
