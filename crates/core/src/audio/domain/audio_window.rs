/// A contiguous slice of an [`AudioBuffer`](super::audio_buffer::AudioBuffer)
/// processed as one inference unit.
#[derive(Clone, Copy, Debug)]
pub struct AudioWindow<'a> {
    index: usize,
    start_sample: usize,
    samples: &'a [f32],
    sample_rate: u32,
}

impl<'a> AudioWindow<'a> {
    pub fn new(index: usize, start_sample: usize, samples: &'a [f32], sample_rate: u32) -> Self {
        Self {
            index,
            start_sample,
            samples,
            sample_rate,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn start_sample(&self) -> usize {
        self.start_sample
    }

    /// Exclusive end index into the parent buffer.
    pub fn end_sample(&self) -> usize {
        self.start_sample + self.samples.len()
    }

    pub fn start_seconds(&self) -> f64 {
        self.start_sample as f64 / self.sample_rate as f64
    }

    pub fn end_seconds(&self) -> f64 {
        self.end_sample() as f64 / self.sample_rate as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_seconds_from_sample_indices() {
        let samples = vec![0.0f32; 80_000];
        let w = AudioWindow::new(1, 320_000, &samples, 16000);
        assert_relative_eq!(w.start_seconds(), 20.0);
        assert_relative_eq!(w.end_seconds(), 25.0);
        assert_eq!(w.end_sample(), 400_000);
    }

    #[test]
    fn test_empty_window() {
        let w = AudioWindow::new(0, 0, &[], 16000);
        assert!(w.is_empty());
        assert_eq!(w.end_sample(), 0);
    }
}
