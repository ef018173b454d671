//! Client for the Ollama-style `/api/generate` endpoint.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Backend;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("failed to contact inference backend at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("inference backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode inference response: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Joins the instruction and the quoted transcript with a blank line.
pub fn compose_prompt(system_prompt: &str, transcript: &str) -> String {
    format!("{system_prompt}\n\n\"{transcript}\"")
}

#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl InferenceClient {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            model: model.into(),
            api_key: None,
        }
    }

    pub fn from_backend(backend: Backend) -> Self {
        Self::new(backend.url, backend.model).with_api_key(backend.api_key)
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one non-streaming generate request and returns the model text.
    pub async fn generate(
        &self,
        transcript: &str,
        system_prompt: &str,
    ) -> Result<String, InferenceError> {
        let payload = GenerateRequest {
            model: &self.model,
            prompt: compose_prompt(system_prompt, transcript),
            stream: false,
        };

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::debug!(url = %self.url, model = %self.model, "sending generate request");
        let response = request
            .send()
            .await
            .map_err(|source| InferenceError::Unreachable {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response body>".to_string());
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateResponse = response.json().await.map_err(InferenceError::Decode)?;
        Ok(body.response)
    }
}
