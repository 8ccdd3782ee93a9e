use std::path::Path;

use tracing::debug;

use crate::{
    core::runner::{Invocation, ToolRunner},
    error::{Result, SeparateError},
};

pub fn mp3_command(ffmpeg: &str, src: &Path, dst: &Path, quality: u8) -> Invocation {
    Invocation::new(ffmpeg)
        .arg("-y")
        .arg("-i")
        .arg(src)
        .arg("-q:a")
        .arg(quality.to_string())
        .arg(dst)
}

/// Encodes `src` to MP3 at `dst` with ffmpeg's VBR `quality`.
pub fn to_mp3<R: ToolRunner + ?Sized>(
    runner: &R,
    ffmpeg: &str,
    src: &Path,
    dst: &Path,
    quality: u8,
) -> Result<()> {
    let cmd = mp3_command(ffmpeg, src, dst, quality);
    debug!("Transcoding {} -> {}", src.display(), dst.display());

    let out = runner.run(&cmd).map_err(|source| SeparateError::Spawn {
        program: cmd.program_name(),
        source,
    })?;

    if !out.success {
        return Err(SeparateError::Transcode {
            input: src.to_path_buf(),
            stderr: out.stderr.trim_end().to_string(),
        });
    }
    Ok(())
}
