use thiserror::Error;

/// A transcription run failed. The message of the underlying failure
/// (model resolution, decoding, inference) is forwarded unchanged.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct TranscriptionError {
    message: String,
}

impl TranscriptionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<Box<dyn std::error::Error>> for TranscriptionError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        Self::new(err.to_string())
    }
}
