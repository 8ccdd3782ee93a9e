use crate::{
    error::{Result, SeparateError},
    types::{Backend, SeparateOptions, StemFormat},
};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

pub const VOCALS_FILE: &str = "vocals.mp3";
pub const ACCOMPANIMENT_FILE: &str = "accompaniment.mp3";

/// Final destinations inside an output directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalOutputs {
    pub vocals: PathBuf,
    pub accompaniment: PathBuf,
}

impl CanonicalOutputs {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            vocals: dir.join(VOCALS_FILE),
            accompaniment: dir.join(ACCOMPANIMENT_FILE),
        }
    }

    pub fn exist(&self) -> bool {
        self.vocals.is_file() && self.accompaniment.is_file()
    }
}

/// Where a backend leaves its stems for one input file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StemLayout {
    pub stems_dir: PathBuf,
    /// Directory tree removed once the stems have been normalized.
    pub cleanup_root: PathBuf,
    pub vocals_stem: &'static str,
    pub accompaniment_stem: &'static str,
    /// Formats to look for, most preferred first.
    pub formats: &'static [StemFormat],
}

impl StemLayout {
    pub fn for_backend(backend: Backend, input: &Path, opts: &SeparateOptions) -> Result<Self> {
        let base = input_base_name(input)?;
        let out = &opts.output_dir;

        Ok(match backend {
            Backend::Demucs => {
                let model_dir = out.join(opts.demucs_model());
                Self {
                    stems_dir: model_dir.join(base),
                    cleanup_root: model_dir,
                    vocals_stem: "vocals",
                    accompaniment_stem: "no_vocals",
                    formats: &[StemFormat::Mp3, StemFormat::Wav],
                }
            }
            Backend::Spleeter => {
                let stems_dir = out.join(base);
                Self {
                    cleanup_root: stems_dir.clone(),
                    stems_dir,
                    vocals_stem: "vocals",
                    accompaniment_stem: "accompaniment",
                    formats: &[StemFormat::Wav],
                }
            }
        })
    }

    pub fn vocals(&self, format: StemFormat) -> PathBuf {
        self.stem_path(self.vocals_stem, format)
    }

    pub fn accompaniment(&self, format: StemFormat) -> PathBuf {
        self.stem_path(self.accompaniment_stem, format)
    }

    fn stem_path(&self, stem: &str, format: StemFormat) -> PathBuf {
        self.stems_dir.join(format!("{stem}.{}", format.extension()))
    }
}

/// File name without its last extension, the way both backends name their
/// per-track directories.
pub fn input_base_name(input: &Path) -> Result<&OsStr> {
    input
        .file_stem()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SeparateError::InvalidInput(input.to_path_buf()))
}
