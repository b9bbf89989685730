use std::path::Path;
use std::time::Instant;

use crate::audio::domain::audio_reader::AudioReader;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::constants::{SAMPLE_RATE, WINDOW_SAMPLES};
use crate::transcription::domain::segment_collector::SegmentCollector;
use crate::transcription::domain::speech_model::SpeechModelLoader;
use crate::transcription::domain::transcription_error::TranscriptionError;
use crate::transcription::domain::transcription_result::TranscriptionResult;

/// Transcribes one audio file in fixed-length windows.
///
/// The model is loaded once per call, the audio is decoded to 16 kHz mono,
/// and every window is transcribed in order. Windows whose decoded text is
/// empty are dropped. Any failure aborts the whole run.
pub struct TranscribeUseCase {
    loader: Box<dyn SpeechModelLoader>,
    reader: Box<dyn AudioReader>,
    logger: Box<dyn PipelineLogger>,
    window_samples: usize,
}

impl TranscribeUseCase {
    pub fn new(
        loader: Box<dyn SpeechModelLoader>,
        reader: Box<dyn AudioReader>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            loader,
            reader,
            logger,
            window_samples: WINDOW_SAMPLES,
        }
    }

    pub fn transcribe(
        &mut self,
        audio_path: &Path,
        model_name: &str,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        self.run(audio_path, model_name).map_err(|e| {
            let err = TranscriptionError::from(e);
            log::error!("Transcription failed: {err}");
            err
        })
    }

    fn run(
        &mut self,
        audio_path: &Path,
        model_name: &str,
    ) -> Result<TranscriptionResult, Box<dyn std::error::Error>> {
        // 1. Model
        self.logger.info(&format!("Loading model: {model_name}"));
        let started = Instant::now();
        let model = self.loader.load(model_name)?;
        self.logger.timing("load_model", elapsed_ms(started));

        // 2. Audio
        let label = audio_path.display();
        self.logger.info(&format!("Loading audio: {label}"));
        let started = Instant::now();
        let audio = self.reader.read_audio(audio_path, SAMPLE_RATE)?;
        self.logger.timing("decode_audio", elapsed_ms(started));
        let seconds = audio.duration();
        self.logger.info(&format!("Decoded {seconds:.1}s of audio"));

        // 3. Windows
        let total = audio.len().div_ceil(self.window_samples);
        let mut collector = SegmentCollector::new();

        for window in audio.windows(self.window_samples) {
            if window.is_empty() {
                continue;
            }
            self.logger.progress(window.index() + 1, total);

            let started = Instant::now();
            let text = model.transcribe_window(window.samples())?;
            self.logger.timing("inference", elapsed_ms(started));

            if collector.push(&window, &text).is_none() {
                log::debug!("Window {} produced no text, dropped", window.index());
            }
        }

        self.logger.metric("segments", collector.len() as f64);
        self.logger.summary();

        Ok(TranscriptionResult::from_segments(
            collector.into_segments(),
            model_name,
        ))
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
