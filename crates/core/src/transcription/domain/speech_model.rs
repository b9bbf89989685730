/// A loaded speech-to-text model paired with its preprocessing.
///
/// One call turns the raw 16 kHz mono samples of a single window into
/// decoded text: feature extraction, greedy generation capped at a fixed
/// number of new tokens, and detokenization with special tokens removed.
pub trait SpeechModel {
    fn transcribe_window(&self, samples: &[f32]) -> Result<String, Box<dyn std::error::Error>>;
}

/// Resolves a model identifier and loads the model it names.
pub trait SpeechModelLoader: Send {
    fn load(&self, model_name: &str) -> Result<Box<dyn SpeechModel>, Box<dyn std::error::Error>>;
}
