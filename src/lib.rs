//! Local relay between a caption browser extension and an Ollama server.
//!
//! `POST /api/ask` takes `{"transcript", "systemPrompt"}`, forwards a composed
//! prompt to `/api/generate`, and answers `{"response"}`. Backend failures
//! are folded into a fallback reply that echoes the transcript.

pub mod api;
pub mod captions;
pub mod llm;
pub mod settings;
pub mod transcribe;

use std::sync::Arc;

use axum::Router;

use llm::InferenceClient;
use settings::Settings;

pub struct AppState {
    pub settings: Settings,
    pub inference: InferenceClient,
    /// Resolved once at construction.
    pub default_system_prompt: String,
}

impl AppState {
    /// Builds the state with a client for the configured backend.
    pub fn new(settings: Settings) -> Self {
        let inference = InferenceClient::from_backend(settings.llm.active_backend());
        let default_system_prompt = settings.default_system_prompt();
        Self {
            settings,
            inference,
            default_system_prompt,
        }
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, host: &str, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!(addr = %listener.local_addr()?, "server listening");
    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use settings::{DEFAULT_SYSTEM_PROMPT_ENV, FALLBACK_SYSTEM_PROMPT};

    // Only test in this crate that touches DEFAULT_SYSTEM_PROMPT.
    #[test]
    fn default_prompt_is_fixed_at_startup() {
        std::env::remove_var(DEFAULT_SYSTEM_PROMPT_ENV);
        let state = AppState::new(Settings::default());
        assert_eq!(state.default_system_prompt, FALLBACK_SYSTEM_PROMPT);

        std::env::set_var(DEFAULT_SYSTEM_PROMPT_ENV, "first");
        let state = AppState::new(Settings::default());
        assert_eq!(state.default_system_prompt, "first");

        std::env::set_var(DEFAULT_SYSTEM_PROMPT_ENV, "second");
        assert_eq!(state.default_system_prompt, "first");

        std::env::remove_var(DEFAULT_SYSTEM_PROMPT_ENV);
    }
}
