use std::path::PathBuf;

use thiserror::Error;

use crate::types::Backend;

/// Central error type for the stem-separate crate.
#[derive(Debug, Error)]
pub enum SeparateError {
    // Generic fallback (wraps anyhow)
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),

    // Domain-specific variants
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Input path has no file name: {}", .0.display())]
    InvalidInput(PathBuf),

    #[error("{}", no_backend_message(.candidates))]
    NoBackendAvailable { candidates: Vec<Backend> },

    #[error("Failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{backend} error: {stderr}")]
    BackendFailed {
        backend: Backend,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Expected stems directory not found: {}", .0.display())]
    StemsDirMissing(PathBuf),

    #[error("Expected stem file not found: {}", .0.display())]
    MissingStem(PathBuf),

    #[error("ffmpeg failed to transcode {}: {stderr}", .input.display())]
    Transcode { input: PathBuf, stderr: String },
}

fn no_backend_message(candidates: &[Backend]) -> String {
    match candidates {
        [] => "No separation backend is installed.".to_string(),
        [only] => format!("{only} is not installed."),
        [first, rest @ ..] => {
            let mut msg = format!("Neither {first}");
            for b in rest {
                msg.push_str(&format!(" nor {b}"));
            }
            msg.push_str(" is installed.");
            msg
        }
    }
}

impl From<std::io::Error> for SeparateError {
    fn from(e: std::io::Error) -> Self {
        SeparateError::Anyhow(e.into())
    }
}

impl From<serde_json::Error> for SeparateError {
    fn from(e: serde_json::Error) -> Self {
        SeparateError::Anyhow(e.into())
    }
}

pub type Result<T> = std::result::Result<T, SeparateError>;
