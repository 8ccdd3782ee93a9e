use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use tempfile::{Builder, TempPath};
use tracing::{debug, info};

use crate::{
    core::{runner::ToolRunner, transcode},
    error::{Result, SeparateError},
    io::progress::{emit_progress, SeparateProgress},
    paths::{CanonicalOutputs, StemLayout},
    types::{SeparateOptions, StemFormat},
};

/// Stem files the backend produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocatedStems {
    pub format: StemFormat,
    pub vocals: PathBuf,
    pub accompaniment: PathBuf,
}

/// Finds the backend's stems. The vocals file decides the format for both.
pub fn locate_stems(layout: &StemLayout) -> Result<LocatedStems> {
    if !layout.stems_dir.is_dir() {
        return Err(SeparateError::StemsDirMissing(layout.stems_dir.clone()));
    }

    let format = layout
        .formats
        .iter()
        .copied()
        .find(|&f| layout.vocals(f).is_file())
        .ok_or_else(|| SeparateError::MissingStem(layout.vocals(layout.formats[0])))?;

    let accompaniment = layout.accompaniment(format);
    if !accompaniment.is_file() {
        return Err(SeparateError::MissingStem(accompaniment));
    }

    Ok(LocatedStems {
        format,
        vocals: layout.vocals(format),
        accompaniment,
    })
}

/// Copies or transcodes the located stems onto the canonical outputs.
pub fn normalize_stems<R: ToolRunner + ?Sized>(
    runner: &R,
    layout: &StemLayout,
    outputs: &CanonicalOutputs,
    opts: &SeparateOptions,
) -> Result<LocatedStems> {
    let stems = locate_stems(layout)?;
    info!(
        "Found {} stems in {}",
        stems.format.extension(),
        layout.stems_dir.display()
    );

    for (stem, src, dst) in [
        ("vocals", &stems.vocals, &outputs.vocals),
        ("accompaniment", &stems.accompaniment, &outputs.accompaniment),
    ] {
        let tmp = staging_path(dst)?;
        match stems.format {
            StemFormat::Mp3 => {
                fs::copy(src, &tmp).with_context(|| {
                    format!("Failed to copy {} to {}", src.display(), tmp.display())
                })?;
            }
            StemFormat::Wav => {
                emit_progress(SeparateProgress::Transcode { stem });
                transcode::to_mp3(runner, &opts.tools.ffmpeg, src, &tmp, opts.mp3_quality)?;
            }
        }
        tmp.persist(dst)
            .with_context(|| format!("Failed to move stem into {}", dst.display()))?;
        debug!("Wrote {}", dst.display());
    }

    Ok(stems)
}

// Sibling temp file so the final rename stays on one filesystem.
fn staging_path(dst: &Path) -> Result<TempPath> {
    let dir = dst.parent().unwrap_or_else(|| Path::new("."));
    let tmp = Builder::new()
        .prefix(".stem-")
        .suffix(".mp3")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    Ok(tmp.into_temp_path())
}

/// Removes the backend's intermediate tree. Errors are ignored.
pub fn cleanup(layout: &StemLayout) {
    if let Err(e) = fs::remove_dir_all(&layout.cleanup_root) {
        debug!(
            "Ignoring cleanup failure for {}: {}",
            layout.cleanup_root.display(),
            e
        );
    }
}
