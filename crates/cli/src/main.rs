use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use hinglish_transcribe_core::audio::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
use hinglish_transcribe_core::output::OutputFormat;
use hinglish_transcribe_core::pipeline::pipeline_logger::ConsolePipelineLogger;
use hinglish_transcribe_core::pipeline::transcribe_use_case::TranscribeUseCase;
use hinglish_transcribe_core::shared::constants::{DEFAULT_MODEL, MODEL_FILENAME};
use hinglish_transcribe_core::transcription::infrastructure::whisper_model::WhisperModelLoader;

/// Transcribe audio in 20-second windows with a pretrained Whisper model.
#[derive(Parser)]
#[command(name = "hinglish-transcribe")]
struct Cli {
    /// Input audio (or video) file.
    audio_path: PathBuf,

    /// Model file path or Hugging Face repository id. A repository must host a
    /// whisper.cpp (ggml) conversion of the model, see --model-file.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Name of the ggml model file inside the Hugging Face repository.
    #[arg(long, default_value = MODEL_FILENAME)]
    model_file: String,

    /// Write the result to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Output format: json, srt or captions.
    #[arg(long, default_value = "json")]
    format: String,

    /// Directory for downloaded models (defaults to the user cache directory).
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let format = validate(&cli)?;

    let loader =
        WhisperModelLoader::new(&cli.model_file, cli.model_dir).with_progress(download_progress);
    let mut use_case = TranscribeUseCase::new(
        Box::new(loader),
        Box::new(FfmpegAudioReader),
        Box::new(ConsolePipelineLogger::new()),
    );

    let result = use_case.transcribe(&cli.audio_path, &cli.model)?;
    let document = format.render(&result)?;

    write_output(&document, cli.output.as_deref(), &mut io::stdout().lock())?;
    if let Some(path) = &cli.output {
        log::info!("Output written to {}", path.display());
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<OutputFormat, Box<dyn std::error::Error>> {
    if !cli.audio_path.exists() {
        return Err(format!("Input file not found: {}", cli.audio_path.display()).into());
    }
    if cli.model.trim().is_empty() {
        return Err("Model name must not be empty".into());
    }
    if cli.model_file.trim().is_empty() {
        return Err("Model file name must not be empty".into());
    }
    Ok(cli.format.parse::<OutputFormat>()?)
}

/// Write the rendered document to `output` if given, otherwise to `stdout`.
fn write_output(
    document: &str,
    output: Option<&Path>,
    stdout: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => fs::write(path, document)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?,
        None => {
            writeln!(stdout, "{document}")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
}
