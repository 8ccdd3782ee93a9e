use crate::{
    core::{
        backend,
        normalize::{cleanup, normalize_stems},
        probe::{probe_backends, select_backend},
        runner::{SystemRunner, ToolRunner},
    },
    error::{Result, SeparateError},
    io::progress::{emit_progress, SeparateProgress},
    paths::{CanonicalOutputs, StemLayout},
    types::{SeparateOptions, SeparationResult},
};
use anyhow::Context;
use std::{fs, path::Path};
use tracing::info;

/// Separates `input` into `vocals.mp3` and `accompaniment.mp3` inside
/// `opts.output_dir`, using whichever installed backend comes first.
pub fn separate_file(input: impl AsRef<Path>, opts: &SeparateOptions) -> Result<SeparationResult> {
    separate_file_with(&SystemRunner, input, opts)
}

/// [`separate_file`] with every external tool routed through `runner`.
pub fn separate_file_with<R: ToolRunner + ?Sized>(
    runner: &R,
    input: impl AsRef<Path>,
    opts: &SeparateOptions,
) -> Result<SeparationResult> {
    let input = input.as_ref();
    if !input.is_file() {
        return Err(SeparateError::InputNotFound(input.to_path_buf()));
    }

    fs::create_dir_all(&opts.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            opts.output_dir.display()
        )
    })?;

    let outputs = CanonicalOutputs::in_dir(&opts.output_dir);
    if opts.skip_existing && outputs.exist() {
        info!("Reusing existing stems in {}", opts.output_dir.display());
        emit_progress(SeparateProgress::Finished);
        return Ok(SeparationResult {
            vocals_path: outputs.vocals,
            accompaniment_path: outputs.accompaniment,
            backend: None,
        });
    }

    emit_progress(SeparateProgress::Stage("probe"));
    let availability = probe_backends(runner, &opts.tools);
    for (b, available) in availability.iter() {
        info!("{b} available: {available}");
        emit_progress(SeparateProgress::Probe {
            backend: b,
            available,
        });
    }
    let chosen = select_backend(&availability, opts.backend)?;
    let layout = StemLayout::for_backend(chosen, input, opts)?;

    emit_progress(SeparateProgress::Separate { backend: chosen });
    backend::invoke(runner, chosen, input, opts)?;

    emit_progress(SeparateProgress::Stage("normalize"));
    normalize_stems(runner, &layout, &outputs, opts)?;

    if !opts.keep_intermediate {
        emit_progress(SeparateProgress::Stage("cleanup"));
        cleanup(&layout);
    }

    emit_progress(SeparateProgress::Finished);
    Ok(SeparationResult {
        vocals_path: outputs.vocals,
        accompaniment_path: outputs.accompaniment,
        backend: Some(chosen),
    })
}
