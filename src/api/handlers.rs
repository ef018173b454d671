use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::settings::PromptPolicy;
use crate::AppState;

use super::models::{AskRequest, AskResponse, ErrorResponse};

const FALLBACK_PREFIX: &str = "⚠️ LLM unavailable. Here's the transcript you sent:\n\n";

/// Reply used when the inference backend cannot produce an answer.
pub fn fallback_response(transcript: &str) -> String {
    format!("{FALLBACK_PREFIX}{transcript}")
}

fn effective_system_prompt(request: &AskRequest, state: &AppState) -> String {
    let requested = request.system_prompt.clone().unwrap_or_default();
    match state.settings.server.prompt_policy {
        PromptPolicy::RequestOnly => requested,
        PromptPolicy::ConfigDefault if requested.is_empty() => {
            state.default_system_prompt.clone()
        }
        PromptPolicy::ConfigDefault => requested,
    }
}

pub async fn ask(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    // A bare `null` body counts as an empty request.
    let request: AskRequest = match serde_json::from_slice::<Option<AskRequest>>(&body) {
        Ok(request) => request.unwrap_or_default(),
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid JSON: {err}"),
                }),
            )
                .into_response();
        }
    };

    let system_prompt = effective_system_prompt(&request, &state);
    let (response, degraded) = match state
        .inference
        .generate(&request.transcript, &system_prompt)
        .await
    {
        Ok(text) => (text, false),
        Err(err) => {
            tracing::warn!(error = %err, "LLM error, returning transcript fallback");
            (fallback_response(&request.transcript), true)
        }
    };

    Json(AskResponse {
        response,
        degraded: state.settings.server.report_degraded.then_some(degraded),
    })
    .into_response()
}

pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}
