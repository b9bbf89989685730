use crate::transcription::domain::transcription_result::TranscriptionResult;

/// Pretty-printed JSON with 2-space indentation. Non-ASCII text is written
/// as-is, not escaped.
pub fn render_json(result: &TranscriptionResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
