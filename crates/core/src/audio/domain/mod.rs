pub mod audio_buffer;
pub mod audio_reader;
pub mod audio_window;
