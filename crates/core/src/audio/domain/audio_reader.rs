use std::path::Path;

use super::audio_buffer::AudioBuffer;

/// Domain interface for decoding an audio (or audio-bearing video) file.
pub trait AudioReader: Send {
    /// Decode the best audio stream to mono PCM resampled to `target_sample_rate`.
    /// A file without an audio stream is an error.
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<AudioBuffer, Box<dyn std::error::Error>>;
}
