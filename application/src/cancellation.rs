//! Cooperative run cancellation.
//!
//! A [`RunTokenSource`] holds a monotonically increasing counter. Starting
//! a run takes a fresh [`RunToken`]; starting another run or calling
//! [`RunTokenSource::stop`] advances the counter and leaves every older
//! token stale. Nothing is aborted: work holding a stale token checks it
//! before each effect and simply stops applying effects.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared source of run tokens
#[derive(Debug, Clone, Default)]
pub struct RunTokenSource {
    current: Arc<AtomicU64>,
}

impl RunTokenSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new run, invalidating any previous token.
    pub fn begin(&self) -> RunToken {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        RunToken {
            id,
            current: Arc::clone(&self.current),
        }
    }

    /// Stop the current run without starting a new one.
    pub fn stop(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }
}

/// Token captured by one run
#[derive(Debug, Clone)]
pub struct RunToken {
    id: u64,
    current: Arc<AtomicU64>,
}

impl RunToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether this run is still the current one.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.id
    }
}
