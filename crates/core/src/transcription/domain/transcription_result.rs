use serde::{Deserialize, Serialize};

use super::segment::Segment;
use crate::shared::constants::LANGUAGE;

/// The complete output of one transcription run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub text: String,
    pub segments: Vec<Segment>,
    pub language: String,
    pub model: String,
}

impl TranscriptionResult {
    /// Build a result whose `text` is the space-joined segment texts.
    pub fn from_segments(segments: Vec<Segment>, model: &str) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            text,
            segments,
            language: LANGUAGE.to_string(),
            model: model.to_string(),
        }
    }
}
