use super::segment::Segment;
use crate::audio::domain::audio_window::AudioWindow;

/// Produces [`Segment`]s from decoded window texts, keeping only windows whose
/// text is non-empty after trimming. Ids are assigned at insertion, so they
/// stay contiguous however many windows are dropped.
#[derive(Debug, Default)]
pub struct SegmentCollector {
    segments: Vec<Segment>,
}

impl SegmentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the decoded text for `window`. Returns the new segment, or
    /// `None` if the text was whitespace-only and the window was dropped.
    pub fn push(&mut self, window: &AudioWindow<'_>, text: &str) -> Option<&Segment> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.segments.push(Segment {
            id: self.segments.len(),
            start: window.start_seconds(),
            end: window.end_seconds(),
            text: text.to_string(),
        });
        self.segments.last()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const RATE: u32 = 16000;

    fn window(index: usize, samples: &[f32]) -> AudioWindow<'_> {
        AudioWindow::new(index, index * 320_000, samples, RATE)
    }

    #[test]
    fn test_push_trims_text() {
        let samples = vec![0.0; 320_000];
        let mut collector = SegmentCollector::new();
        let seg = collector.push(&window(0, &samples), "  haan bilkul \n").unwrap();
        assert_eq!(seg.text, "haan bilkul");
    }

    #[rstest]
    #[case::empty("")]
    #[case::spaces("   ")]
    #[case::newlines("\n\t\n")]
    fn test_whitespace_only_text_is_dropped(#[case] text: &str) {
        let samples = vec![0.0; 320_000];
        let mut collector = SegmentCollector::new();
        assert!(collector.push(&window(0, &samples), text).is_none());
        assert!(collector.is_empty());
    }

    #[test]
    fn test_ids_stay_contiguous_across_dropped_windows() {
        let samples = vec![0.0; 320_000];
        let mut collector = SegmentCollector::new();
        collector.push(&window(0, &samples), "pehla");
        collector.push(&window(1, &samples), " ");
        collector.push(&window(2, &samples), "teesra");
        collector.push(&window(3, &samples), "");
        collector.push(&window(4, &samples), "paanchva");

        let segments = collector.into_segments();
        let ids: Vec<_> = segments.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_relative_eq!(segments[1].start, 40.0);
        assert_relative_eq!(segments[1].end, 60.0);
        assert_relative_eq!(segments[2].start, 80.0);
    }

    #[test]
    fn test_short_final_window_ends_at_audio_duration() {
        let samples = vec![0.0; 8000];
        let mut collector = SegmentCollector::new();
        let seg = collector.push(&window(1, &samples), "bas").unwrap();
        assert_relative_eq!(seg.start, 20.0);
        assert_relative_eq!(seg.end, 20.5);
    }
}
