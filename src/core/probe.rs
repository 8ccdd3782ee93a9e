use tracing::debug;

use crate::{
    core::runner::{Invocation, ToolRunner},
    error::{Result, SeparateError},
    types::Backend,
    utils::ToolPaths,
};

/// Probe outcome for every backend, in priority order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Availability {
    entries: Vec<(Backend, bool)>,
}

impl Availability {
    pub fn new(entries: Vec<(Backend, bool)>) -> Self {
        Self { entries }
    }

    pub fn is_available(&self, backend: Backend) -> bool {
        self.entries
            .iter()
            .any(|&(b, available)| b == backend && available)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Backend, bool)> + '_ {
        self.entries.iter().copied()
    }
}

pub fn backend_program(tools: &ToolPaths, backend: Backend) -> &str {
    match backend {
        Backend::Demucs => &tools.demucs,
        Backend::Spleeter => &tools.spleeter,
    }
}

/// `true` iff `<program> --help` starts and exits cleanly.
pub fn probe_program<R: ToolRunner + ?Sized>(runner: &R, program: &str) -> bool {
    match runner.run(&Invocation::new(program).arg("--help")) {
        Ok(out) => out.success,
        Err(e) => {
            debug!("{program} could not be started: {e}");
            false
        }
    }
}

pub fn probe_backends<R: ToolRunner + ?Sized>(runner: &R, tools: &ToolPaths) -> Availability {
    Availability::new(
        Backend::PRIORITY
            .iter()
            .map(|&b| (b, probe_program(runner, backend_program(tools, b))))
            .collect(),
    )
}

/// First available backend in priority order, or `forced` if it is available.
pub fn select_backend(availability: &Availability, forced: Option<Backend>) -> Result<Backend> {
    match forced {
        Some(b) if availability.is_available(b) => Ok(b),
        Some(b) => Err(SeparateError::NoBackendAvailable { candidates: vec![b] }),
        None => availability
            .iter()
            .find(|&(_, available)| available)
            .map(|(b, _)| b)
            .ok_or_else(|| SeparateError::NoBackendAvailable {
                candidates: availability.iter().map(|(b, _)| b).collect(),
            }),
    }
}
