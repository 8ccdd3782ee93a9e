use std::env;

pub const DEMUCS_BIN_ENV: &str = "STEM_SEPARATE_DEMUCS_BIN";
pub const SPLEETER_BIN_ENV: &str = "STEM_SEPARATE_SPLEETER_BIN";
pub const FFMPEG_BIN_ENV: &str = "STEM_SEPARATE_FFMPEG_BIN";

/// Programs used for each external tool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolPaths {
    pub demucs: String,
    pub spleeter: String,
    pub ffmpeg: String,
}

impl ToolPaths {
    /// Bare tool names, resolved on `PATH` at spawn time.
    pub fn system() -> Self {
        Self {
            demucs: "demucs".into(),
            spleeter: "spleeter".into(),
            ffmpeg: "ffmpeg".into(),
        }
    }

    /// Like [`ToolPaths::system`], with `STEM_SEPARATE_*_BIN` overrides applied.
    pub fn from_env() -> Self {
        let defaults = Self::system();
        Self {
            demucs: tool_program(DEMUCS_BIN_ENV, defaults.demucs),
            spleeter: tool_program(SPLEETER_BIN_ENV, defaults.spleeter),
            ffmpeg: tool_program(FFMPEG_BIN_ENV, defaults.ffmpeg),
        }
    }
}

fn tool_program(key: &str, default: String) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}
