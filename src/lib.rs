//! # stem-separate
//!
//! Splits an audio file into vocals and accompaniment by driving an external
//! separator (Demucs, falling back to Spleeter) and normalizing whatever it
//! writes into `vocals.mp3` and `accompaniment.mp3`.

pub mod core;
pub mod error;
pub mod io;
pub mod paths;
pub mod pipeline;
pub mod types;
pub mod utils;

pub use crate::{
    core::runner::{Invocation, SystemRunner, ToolOutput, ToolRunner},
    error::{Result, SeparateError},
    io::progress::{set_progress_callback, SeparateProgress},
    paths::CanonicalOutputs,
    pipeline::{separate_file, separate_file_with},
    types::{Backend, SeparateOptions, SeparationResult},
    utils::ToolPaths,
};
