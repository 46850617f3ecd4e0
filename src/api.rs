//! HTTP API for the helpline chatbot

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::bot::Bot;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<dyn Bot>,
}

impl AppState {
    pub fn new(bot: Arc<dyn Bot>) -> Self {
        Self { bot }
    }
}
