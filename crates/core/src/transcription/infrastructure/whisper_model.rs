use std::path::{Path, PathBuf};
use std::sync::Once;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::model_resolver;
use crate::shared::constants::{MAX_INFERENCE_THREADS, MAX_NEW_TOKENS, SAMPLE_RATE};
use crate::transcription::domain::speech_model::{SpeechModel, SpeechModelLoader};

/// whisper.cpp rejects inputs shorter than one second; shorter windows are
/// padded with trailing silence.
const MIN_INPUT_SAMPLES: usize = SAMPLE_RATE as usize;

static LOGGING_HOOKS: Once = Once::new();

/// Speech model backed by whisper.cpp via whisper-rs.
///
/// The context is loaded once and shared by every window; each window gets
/// a fresh decoding state. Log-mel feature extraction happens inside
/// whisper.cpp.
pub struct WhisperModel {
    ctx: WhisperContext,
}

impl WhisperModel {
    pub fn load(model_path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }

        LOGGING_HOOKS.call_once(whisper_rs::install_logging_hooks);

        let ctx = WhisperContext::new_with_params(
            model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        Ok(Self { ctx })
    }

    fn greedy_params() -> FullParams<'static, 'static> {
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some("auto"));
        params.set_translate(false);
        params.set_no_context(true);
        params.set_single_segment(true);
        params.set_no_timestamps(true);
        params.set_max_tokens(MAX_NEW_TOKENS);
        // No temperature fallback: decoding stays deterministic
        params.set_temperature(0.0);
        params.set_temperature_inc(0.0);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(MAX_INFERENCE_THREADS) as i32);
        params
    }
}

impl SpeechModel for WhisperModel {
    fn transcribe_window(&self, samples: &[f32]) -> Result<String, Box<dyn std::error::Error>> {
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let padded;
        let input = if samples.len() < MIN_INPUT_SAMPLES {
            padded = pad_with_silence(samples, MIN_INPUT_SAMPLES);
            &padded[..]
        } else {
            samples
        };

        state
            .full(Self::greedy_params(), input)
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut text = String::new();
        for seg_idx in 0..state.full_n_segments() {
            let Some(segment) = state.get_segment(seg_idx) else {
                continue;
            };
            let segment_text = segment
                .to_str_lossy()
                .map_err(|e| format!("Failed to decode Whisper output: {e}"))?;
            text.push_str(&segment_text);
        }

        Ok(text.trim().to_string())
    }
}

/// Loads [`WhisperModel`]s by name through the model resolver.
///
/// Repository ids are fetched as `file_name` from that repository, which
/// must be a whisper.cpp (ggml) conversion of the checkpoint.
pub struct WhisperModelLoader {
    file_name: String,
    cache_dir: Option<PathBuf>,
    progress: Option<fn(u64, u64)>,
}

impl WhisperModelLoader {
    pub fn new(file_name: &str, cache_dir: Option<PathBuf>) -> Self {
        Self {
            file_name: file_name.to_string(),
            cache_dir,
            progress: None,
        }
    }

    /// Report model download progress as `(bytes_downloaded, total_bytes)`.
    pub fn with_progress(mut self, progress: fn(u64, u64)) -> Self {
        self.progress = Some(progress);
        self
    }
}

impl SpeechModelLoader for WhisperModelLoader {
    fn load(&self, model_name: &str) -> Result<Box<dyn SpeechModel>, Box<dyn std::error::Error>> {
        let progress = self
            .progress
            .map(|f| Box::new(f) as model_resolver::ProgressFn);
        let model_path = model_resolver::resolve(
            model_name,
            &self.file_name,
            self.cache_dir.as_deref(),
            progress,
        )?;
        log::debug!("Model {model_name} resolved to {}", model_path.display());
        Ok(Box::new(WhisperModel::load(&model_path)?))
    }
}

fn pad_with_silence(samples: &[f32], len: usize) -> Vec<f32> {
    let mut padded = samples.to_vec();
    padded.resize(len.max(samples.len()), 0.0);
    padded
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::MODEL_FILENAME;

    #[test]
    fn test_load_nonexistent_path_returns_error() {
        let result = WhisperModel::load(Path::new("/nonexistent/model.bin"));
        let err = result.err().unwrap().to_string();
        assert!(
            err.contains("not found"),
            "Expected 'not found' in error, got: {err}"
        );
    }

    #[test]
    fn test_loader_rejects_invalid_model_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        let loader = WhisperModelLoader::new(MODEL_FILENAME, Some(tmp.path().to_path_buf()));
        let result = loader.load("not a model");
        assert!(result.is_err());
    }

    #[test]
    fn test_loader_uses_configured_file_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        let repo_dir = tmp.path().join("owner--repo");
        std::fs::create_dir_all(&repo_dir).unwrap();
        std::fs::write(repo_dir.join("ggml-custom.bin"), b"not a ggml file").unwrap();

        let loader = WhisperModelLoader::new("ggml-custom.bin", Some(tmp.path().to_path_buf()));
        let err = loader.load("owner/repo").err().unwrap().to_string();
        assert!(
            err.contains("Failed to load Whisper model"),
            "Expected the cached file to be opened, got: {err}"
        );
    }

    #[test]
    fn test_pad_with_silence_extends_short_input() {
        let padded = pad_with_silence(&[0.5, -0.5], 4);
        assert_eq!(padded, vec![0.5, -0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_pad_with_silence_keeps_long_input() {
        let padded = pad_with_silence(&[0.1; 8], 4);
        assert_eq!(padded.len(), 8);
    }

    #[test]
    #[ignore] // Requires a whisper model file in WHISPER_TEST_MODEL
    fn test_transcribe_window_does_not_crash_on_sine_wave() {
        let model_path = PathBuf::from(
            std::env::var("WHISPER_TEST_MODEL").expect("WHISPER_TEST_MODEL not set"),
        );
        let model = WhisperModel::load(&model_path).expect("Failed to load model");

        let len = 3 * SAMPLE_RATE as usize;
        let samples: Vec<f32> = (0..len)
            .map(|i| {
                let t = i as f64 / SAMPLE_RATE as f64;
                (2.0 * std::f64::consts::PI * 440.0 * t).sin() as f32
            })
            .collect();

        let result = model.transcribe_window(&samples);
        assert!(result.is_ok(), "Transcription should not error: {result:?}");
    }
}
