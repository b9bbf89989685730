/// Sample rate every decoded input is resampled to before inference.
pub const SAMPLE_RATE: u32 = 16000;

/// Length of one inference window.
pub const WINDOW_SECONDS: u32 = 20;
pub const WINDOW_SAMPLES: usize = (WINDOW_SECONDS * SAMPLE_RATE) as usize;

/// Cap on newly generated tokens per window.
pub const MAX_NEW_TOKENS: i32 = 200;

pub const DEFAULT_MODEL: &str = "Oriserve/Whisper-Hindi2Hinglish-Swift";

/// Reported language of every transcription, independent of detected content.
pub const LANGUAGE: &str = "hi";

/// Default file fetched from a model repository. It must be a whisper.cpp
/// (ggml) conversion; transformers checkpoints cannot be loaded.
pub const MODEL_FILENAME: &str = "ggml-model.bin";
pub const HUGGING_FACE_URL: &str = "https://huggingface.co";

pub const MAX_INFERENCE_THREADS: usize = 4;
