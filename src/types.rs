use std::{fmt, path::PathBuf};

use serde::Serialize;

use crate::utils::ToolPaths;

/// Default Demucs model; also the name of the directory Demucs writes into.
pub const DEFAULT_DEMUCS_MODEL: &str = "htdemucs";

/// External separation tool, in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Demucs,
    Spleeter,
}

impl Backend {
    /// Probing order. The first available backend wins.
    pub const PRIORITY: [Backend; 2] = [Backend::Demucs, Backend::Spleeter];

    pub fn name(self) -> &'static str {
        match self {
            Backend::Demucs => "Demucs",
            Backend::Spleeter => "Spleeter",
        }
    }

    pub fn install_hint(self) -> &'static str {
        match self {
            Backend::Demucs => "pip install demucs",
            Backend::Spleeter => "pip install spleeter",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StemFormat {
    Mp3,
    Wav,
}

impl StemFormat {
    pub fn extension(self) -> &'static str {
        match self {
            StemFormat::Mp3 => "mp3",
            StemFormat::Wav => "wav",
        }
    }
}

#[derive(Clone, Debug)]
pub struct SeparateOptions {
    pub output_dir: PathBuf,
    /// Force a backend instead of taking the first available one.
    pub backend: Option<Backend>,
    /// Demucs model; `None` uses the tool's default (`htdemucs`).
    pub demucs_model: Option<String>,
    /// Bitrate (kbps) Demucs encodes its MP3 stems with.
    pub mp3_bitrate: u32,
    /// ffmpeg `-q:a` value used when a stem has to be transcoded.
    pub mp3_quality: u8,
    pub skip_existing: bool,
    pub keep_intermediate: bool,
    pub tools: ToolPaths,
}

impl SeparateOptions {
    pub fn demucs_model(&self) -> &str {
        self.demucs_model.as_deref().unwrap_or(DEFAULT_DEMUCS_MODEL)
    }
}

impl Default for SeparateOptions {
    fn default() -> Self {
        Self {
            output_dir: ".".into(),
            backend: None,
            demucs_model: None,
            mp3_bitrate: 320,
            mp3_quality: 2,
            skip_existing: false,
            keep_intermediate: false,
            tools: ToolPaths::from_env(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct SeparationResult {
    pub vocals_path: PathBuf,
    pub accompaniment_path: PathBuf,
    /// `None` when existing outputs were reused.
    pub backend: Option<Backend>,
}
