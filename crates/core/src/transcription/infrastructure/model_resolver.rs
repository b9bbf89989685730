use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shared::constants::HUGGING_FACE_URL;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("invalid model name '{0}': expected a model file path or an 'owner/name' repository id")]
    InvalidName(String),
    #[error("invalid model file name '{0}': expected a plain file name inside the repository")]
    InvalidFileName(String),
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source} (the repository must host a whisper.cpp ggml model file)")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve a model name to a local model file, downloading it on a cache miss.
///
/// Resolution order:
/// 1. `name` is a path to an existing file
/// 2. Cached copy of `file_name` from the Hugging Face repository `name`
///    under `cache_dir` (or the platform cache directory)
/// 3. Download `file_name` from the repository into the cache
pub fn resolve(
    name: &str,
    file_name: &str,
    cache_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let as_path = Path::new(name);
    if as_path.is_file() {
        return Ok(as_path.to_path_buf());
    }

    let cache_dir = match cache_dir {
        Some(dir) => dir.to_path_buf(),
        None => model_cache_dir()?,
    };
    let cached_path = cached_model_path(&cache_dir, name, file_name)?;
    if cached_path.exists() {
        return Ok(cached_path);
    }

    if let Some(parent) = cached_path.parent() {
        fs::create_dir_all(parent).map_err(ModelResolveError::CacheDir)?;
    }
    log::info!("Downloading model {name} ({file_name})");
    download(&model_url(name, file_name)?, &cached_path, progress)?;
    Ok(cached_path)
}

/// Cache location of `file_name` from repository `name`:
/// `<cache_dir>/<owner>--<repo>/<file_name>`.
pub fn cached_model_path(
    cache_dir: &Path,
    name: &str,
    file_name: &str,
) -> Result<PathBuf, ModelResolveError> {
    let (owner, repo) = split_repo_id(name)?;
    let file_name = check_file_name(file_name)?;
    Ok(cache_dir.join(format!("{owner}--{repo}")).join(file_name))
}

/// Download URL of `file_name` in repository `name`.
pub fn model_url(name: &str, file_name: &str) -> Result<String, ModelResolveError> {
    let (owner, repo) = split_repo_id(name)?;
    let file_name = check_file_name(file_name)?;
    Ok(format!(
        "{HUGGING_FACE_URL}/{owner}/{repo}/resolve/main/{file_name}"
    ))
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/hinglish-transcribe/models/`
/// - Linux: `$XDG_CACHE_HOME/hinglish-transcribe/models/` or `~/.cache/hinglish-transcribe/models/`
/// - Windows: `%LOCALAPPDATA%/hinglish-transcribe/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir()
            .map(|d| d.join("hinglish-transcribe").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::cache_dir()
            .map(|d| d.join("hinglish-transcribe").join("models"))
            .ok_or(ModelResolveError::NoCacheDir)
    }
}

fn check_file_name(file_name: &str) -> Result<&str, ModelResolveError> {
    let valid = !file_name.is_empty()
        && file_name != "."
        && file_name != ".."
        && !file_name.contains(['/', '\\']);
    if valid {
        Ok(file_name)
    } else {
        Err(ModelResolveError::InvalidFileName(file_name.to_string()))
    }
}

fn split_repo_id(name: &str) -> Result<(&str, &str), ModelResolveError> {
    let invalid = || ModelResolveError::InvalidName(name.to_string());
    let (owner, repo) = name.split_once('/').ok_or_else(invalid)?;
    let valid_part = |part: &str| {
        !part.is_empty()
            && part != "."
            && part != ".."
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    };
    if !valid_part(owner) || !valid_part(repo) {
        return Err(invalid());
    }
    Ok((owner, repo))
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let temp_path = dest.with_extension("part");

    let result = download_inner(url, dest, &temp_path, progress);

    // Clean up .part file on any error
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn download_inner(
    url: &str,
    dest: &Path,
    temp_path: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelResolveError> {
    let mut response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let mut downloaded: u64 = 0;

    let write_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ModelResolveError::Write { path, source }
    };
    let mut file = fs::File::create(temp_path).map_err(write_err(temp_path))?;

    // Stream in 1MB chunks so large checkpoints never sit in memory whole
    let mut buf = vec![0u8; 1024 * 1024];
    loop {
        let n = response.read(&mut buf).map_err(write_err(temp_path))?;
        if n == 0 {
            break;
        }
        file.write_all(&buf[..n]).map_err(write_err(temp_path))?;
        downloaded += n as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }

    file.flush().map_err(write_err(temp_path))?;
    drop(file);

    fs::rename(temp_path, dest).map_err(write_err(dest))?;

    Ok(())
}
