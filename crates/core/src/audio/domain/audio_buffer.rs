use super::audio_window::AudioWindow;

/// Decoded mono audio: PCM samples normalized to [-1.0, 1.0] at a fixed rate.
#[derive(Clone, Debug)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Borrow the samples in `[start, end)` as a window, clamped to the buffer.
    pub fn window(&self, index: usize, start: usize, end: usize) -> AudioWindow<'_> {
        let end = end.min(self.samples.len());
        let start = start.min(end);
        AudioWindow::new(index, start, &self.samples[start..end], self.sample_rate)
    }

    /// Partition into consecutive non-overlapping windows of `window_len`
    /// samples. The last window holds the remainder; an empty buffer yields
    /// no windows.
    pub fn windows(&self, window_len: usize) -> impl Iterator<Item = AudioWindow<'_>> {
        let window_len = window_len.max(1);
        (0..self.samples.len())
            .step_by(window_len)
            .enumerate()
            .map(move |(index, start)| self.window(index, start, start + window_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn buffer(len: usize) -> AudioBuffer {
        AudioBuffer::new(vec![0.0; len], 16000)
    }

    #[test]
    fn test_new_creates_buffer_with_correct_fields() {
        let samples = vec![0.25f32; 16000];
        let buf = AudioBuffer::new(samples.clone(), 16000);
        assert_eq!(buf.samples(), &samples[..]);
        assert_eq!(buf.len(), 16000);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_duration() {
        assert_relative_eq!(buffer(48000).duration(), 3.0);
    }

    #[test]
    fn test_empty_buffer_has_no_windows() {
        let buf = buffer(0);
        assert!(buf.is_empty());
        assert_eq!(buf.windows(320_000).count(), 0);
    }

    #[rstest]
    #[case::one_sample(1, 1)]
    #[case::under_one_window(160_000, 1)]
    #[case::exactly_one_window(320_000, 1)]
    #[case::one_sample_over(320_001, 2)]
    #[case::two_and_a_half(800_000, 3)]
    fn test_window_count_is_ceiling(#[case] len: usize, #[case] expected: usize) {
        assert_eq!(buffer(len).windows(320_000).count(), expected);
    }

    #[test]
    fn test_windows_are_contiguous_and_cover_buffer() {
        let buf = buffer(700_000);
        let windows: Vec<_> = buf.windows(320_000).collect();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start_sample(), 0);
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end_sample(), pair[1].start_sample());
        }
        assert_eq!(windows[2].end_sample(), 700_000);
        assert_eq!(windows[2].len(), 60_000);
    }

    #[test]
    fn test_windows_are_indexed_in_order() {
        let buf = buffer(650_000);
        let indices: Vec<_> = buf.windows(320_000).map(|w| w.index()).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_window_clamps_to_buffer_end() {
        let buf = buffer(100);
        let w = buf.window(0, 50, 500);
        assert_eq!(w.start_sample(), 50);
        assert_eq!(w.end_sample(), 100);
        assert_eq!(w.samples().len(), 50);
    }

    #[test]
    fn test_window_past_end_is_empty() {
        let buf = buffer(100);
        let w = buf.window(3, 200, 300);
        assert!(w.is_empty());
    }
}
