//! Millisecond-based caption list for video overlay renderers.

use serde::Serialize;

use super::srt::clean_caption_text;
use crate::transcription::domain::segment::Segment;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    pub id: usize,
    pub start_time: u64,
    pub end_time: u64,
    pub text: String,
    pub duration: i64,
}

/// One caption per segment, numbered from 1, times rounded to milliseconds.
pub fn build_captions(segments: &[Segment]) -> Vec<Caption> {
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| Caption {
            id: i + 1,
            start_time: to_millis(seg.start),
            end_time: to_millis(seg.end),
            text: clean_caption_text(&seg.text),
            duration: (seg.duration() * 1000.0).round() as i64,
        })
        .collect()
}

pub fn render_captions(segments: &[Segment]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&build_captions(segments))
}

fn to_millis(seconds: f64) -> u64 {
    (seconds.max(0.0) * 1000.0).round() as u64
}
