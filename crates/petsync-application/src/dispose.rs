use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag set when the owner of a coordinator goes away.
///
/// Checked after every awaited gateway call; once disposed, late results are
/// dropped instead of touching shared state.
#[derive(Debug, Clone, Default)]
pub struct DisposeGuard {
    disposed: Arc<AtomicBool>,
}

impl DisposeGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}
