use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Run-wide counters shared by workers and sniffers
#[derive(Debug, Default)]
pub struct MirrorStats {
    pages_stored: AtomicUsize,
    assets_captured: AtomicUsize,
    retries: AtomicUsize,
    permanent_failures: AtomicUsize,
}

impl MirrorStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page(&self) {
        self.pages_stored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_asset(&self) {
        self.assets_captured.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_permanent_failure(&self) {
        self.permanent_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn pages_stored(&self) -> usize {
        self.pages_stored.load(Ordering::Relaxed)
    }

    pub fn assets_captured(&self) -> usize {
        self.assets_captured.load(Ordering::Relaxed)
    }

    pub fn retries(&self) -> usize {
        self.retries.load(Ordering::Relaxed)
    }

    pub fn permanent_failures(&self) -> usize {
        self.permanent_failures.load(Ordering::Relaxed)
    }
}

impl fmt::Display for MirrorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages stored, {} assets captured, {} retries, {} permanent failures",
            self.pages_stored(),
            self.assets_captured(),
            self.retries(),
            self.permanent_failures()
        )
    }
}
