pub mod segment;
pub mod segment_collector;
pub mod speech_model;
pub mod transcription_error;
pub mod transcription_result;
