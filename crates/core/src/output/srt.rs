//! SubRip (SRT) subtitle rendering of transcription segments.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::transcription::domain::segment::Segment;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.!?])").unwrap());
static SENTENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?]\s+)([a-z])").unwrap());
static TEXT_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]").unwrap());

/// Render segments as numbered SRT cues (numbering starts at 1, cues
/// separated by a blank line). No segments renders as the empty string.
pub fn render_srt(segments: &[Segment]) -> String {
    segments
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            format!(
                "{}\n{} --> {}\n{}",
                i + 1,
                format_timestamp(seg.start),
                format_timestamp(seg.end),
                clean_caption_text(&seg.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format seconds as `HH:MM:SS,mmm`, truncating each component.
pub fn format_timestamp(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let whole = seconds.floor() as u64;
    let hours = whole / 3600;
    let minutes = (whole % 3600) / 60;
    let secs = whole % 60;
    let millis = ((seconds.fract() * 1000.0).floor() as u64).min(999);
    format!("{hours:02}:{minutes:02}:{secs:02},{millis:03}")
}

/// Normalize caption text. Steps run in order: trim, collapse whitespace,
/// strip `<...>` markup, drop whitespace before `.!?`, uppercase the letter
/// after sentence-ending punctuation, uppercase a leading letter.
pub fn clean_caption_text(text: &str) -> String {
    let text = WHITESPACE.replace_all(text.trim(), " ");
    let text = MARKUP_TAG.replace_all(&text, "");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let text = SENTENCE_START.replace_all(&text, |caps: &Captures| {
        format!("{}{}", &caps[1], caps[2].to_uppercase())
    });
    TEXT_START
        .replace(&text, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

/// Outcome of checking segments before they are written as subtitles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SrtValidation {
    pub errors: Vec<String>,
}

impl SrtValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check that there is at least one cue, that consecutive cues do not
/// overlap and that every cue ends after it starts. Entries are numbered
/// from 1, as in the rendered file.
pub fn validate_segments(segments: &[Segment]) -> SrtValidation {
    let mut errors = Vec::new();

    if segments.is_empty() {
        errors.push("No valid subtitle entries found".to_string());
        return SrtValidation { errors };
    }

    for (i, pair) in segments.windows(2).enumerate() {
        if pair[0].end > pair[1].start {
            errors.push(format!(
                "Overlapping timestamps at entry {} and {}",
                i + 1,
                i + 2
            ));
        }
    }

    for (i, seg) in segments.iter().enumerate() {
        if seg.end <= seg.start {
            errors.push(format!("Invalid duration at entry {}", i + 1));
        }
    }

    SrtValidation { errors }
}
