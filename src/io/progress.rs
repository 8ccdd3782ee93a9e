use std::sync::{Mutex, OnceLock};

use crate::types::Backend;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeparateProgress<'a> {
    Probe { backend: Backend, available: bool },
    Separate { backend: Backend },
    /// One of `probe`, `normalize`, `cleanup`.
    Stage(&'static str),
    Transcode { stem: &'a str },
    Finished,
}

type ProgressCb = Box<dyn Fn(SeparateProgress<'_>) + Send + 'static>;

static PROGRESS_CB: OnceLock<Mutex<Option<ProgressCb>>> = OnceLock::new();

/// Installs the process-wide progress callback, replacing any previous one.
pub fn set_progress_callback(cb: impl Fn(SeparateProgress<'_>) + Send + 'static) {
    let slot = PROGRESS_CB.get_or_init(|| Mutex::new(None));
    if let Ok(mut g) = slot.lock() {
        *g = Some(Box::new(cb));
    }
}

pub fn clear_progress_callback() {
    if let Some(m) = PROGRESS_CB.get() {
        if let Ok(mut g) = m.lock() {
            *g = None;
        }
    }
}

pub fn emit_progress(event: SeparateProgress<'_>) {
    if let Some(m) = PROGRESS_CB.get() {
        if let Ok(g) = m.lock() {
            if let Some(cb) = &*g {
                cb(event);
            }
        }
    }
}
