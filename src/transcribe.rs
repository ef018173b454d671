//! Seam for turning recorded audio into transcript text.

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("audio transcription is not implemented")]
    NotImplemented,
}

/// Turns a recorded audio file into transcript text.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &Path) -> Result<String, TranscriptionError>;
}

/// Placeholder used until a speech-to-text engine is wired in.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableTranscriber;

impl Transcriber for UnavailableTranscriber {
    fn transcribe(&self, _audio: &Path) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::NotImplemented)
    }
}
