pub mod audio;
pub mod output;
pub mod pipeline;
pub mod shared;
pub mod transcription;
