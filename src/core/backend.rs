use std::path::Path;

use tracing::{debug, info};

use crate::{
    core::{
        probe::backend_program,
        runner::{Invocation, ToolOutput, ToolRunner},
    },
    error::{Result, SeparateError},
    types::{Backend, SeparateOptions, DEFAULT_DEMUCS_MODEL},
};

/// Fixed two-stem command line for `backend`.
pub fn separation_command(backend: Backend, input: &Path, opts: &SeparateOptions) -> Invocation {
    let program = backend_program(&opts.tools, backend);

    match backend {
        Backend::Demucs => {
            let mut cmd = Invocation::new(program)
                .arg("--two-stems=vocals")
                .arg("--mp3")
                .arg("--mp3-bitrate")
                .arg(opts.mp3_bitrate.to_string());
            let model = opts.demucs_model();
            if model != DEFAULT_DEMUCS_MODEL {
                cmd = cmd.arg("-n").arg(model);
            }
            cmd.arg("-o").arg(&opts.output_dir).arg(input)
        }
        Backend::Spleeter => Invocation::new(program)
            .args(["separate", "-p", "spleeter:2stems", "-o"])
            .arg(&opts.output_dir)
            .arg(input),
    }
}

/// Runs the backend to completion. A non-zero exit carries the captured stderr.
pub fn invoke<R: ToolRunner + ?Sized>(
    runner: &R,
    backend: Backend,
    input: &Path,
    opts: &SeparateOptions,
) -> Result<ToolOutput> {
    let cmd = separation_command(backend, input, opts);
    info!("Separating with {}: {}", backend, input.display());

    let out = runner.run(&cmd).map_err(|source| SeparateError::Spawn {
        program: cmd.program_name(),
        source,
    })?;

    for line in out.stdout.lines().filter(|l| !l.trim().is_empty()) {
        debug!("{backend} stdout: {line}");
    }

    if !out.success {
        debug!("{} failed with exit code {:?}", backend, out.code);
        return Err(SeparateError::BackendFailed {
            backend,
            code: out.code,
            stderr: out.stderr.trim_end().to_string(),
        });
    }

    Ok(out)
}
