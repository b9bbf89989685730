pub mod captions;
pub mod json;
pub mod srt;

use std::str::FromStr;

use crate::transcription::domain::transcription_result::TranscriptionResult;

/// Document format a transcription result is rendered to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Srt,
    Captions,
}

impl OutputFormat {
    pub fn render(
        &self,
        result: &TranscriptionResult,
    ) -> Result<String, Box<dyn std::error::Error>> {
        match self {
            OutputFormat::Json => Ok(json::render_json(result)?),
            OutputFormat::Srt => {
                let validation = srt::validate_segments(&result.segments);
                if !validation.is_valid() {
                    log::warn!("SRT validation warnings: {}", validation.errors.join("; "));
                }
                Ok(srt::render_srt(&result.segments))
            }
            OutputFormat::Captions => Ok(captions::render_captions(&result.segments)?),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "srt" => Ok(OutputFormat::Srt),
            "captions" => Ok(OutputFormat::Captions),
            other => Err(format!(
                "Format must be one of: json, srt, captions, got '{other}'"
            )),
        }
    }
}
