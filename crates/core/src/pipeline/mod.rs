pub mod pipeline_logger;
pub mod transcribe_use_case;
