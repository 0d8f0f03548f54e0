//! Global atomic counters for evaluation observability.
//!
//! Counters are incremented silently at the call site. Call
//! [`Metrics::flush`] to emit current values as a single
//! `tracing::info!` event (e.g. before a binary exits).

use std::sync::atomic::{AtomicU64, Ordering};

/// Global metrics singleton.
pub static METRICS: Metrics = Metrics::new();

/// Lightweight atomic counters. They never feed back into any result.
pub struct Metrics {
    evaluations_completed: AtomicU64,
    evaluations_failed: AtomicU64,
    renders_completed: AtomicU64,
    renders_failed: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub const fn new() -> Self {
        Self {
            evaluations_completed: AtomicU64::new(0),
            evaluations_failed: AtomicU64::new(0),
            renders_completed: AtomicU64::new(0),
            renders_failed: AtomicU64::new(0),
        }
    }

    pub fn inc_evaluations_completed(&self) {
        self.evaluations_completed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "evaluations_completed", "counter incremented");
    }

    pub fn inc_evaluations_failed(&self) {
        self.evaluations_failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "evaluations_failed", "counter incremented");
    }

    pub fn inc_renders_completed(&self) {
        self.renders_completed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "renders_completed", "counter incremented");
    }

    pub fn inc_renders_failed(&self) {
        self.renders_failed.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(metric = "renders_failed", "counter incremented");
    }

    /// Emit all current counter values as a single `info!` event.
    pub fn flush(&self) {
        tracing::info!(
            metric = "flush",
            evaluations_completed = self.evaluations_completed(),
            evaluations_failed = self.evaluations_failed(),
            renders_completed = self.renders_completed(),
            renders_failed = self.renders_failed(),
        );
    }

    pub fn evaluations_completed(&self) -> u64 {
        self.evaluations_completed.load(Ordering::Relaxed)
    }

    pub fn evaluations_failed(&self) -> u64 {
        self.evaluations_failed.load(Ordering::Relaxed)
    }

    pub fn renders_completed(&self) -> u64 {
        self.renders_completed.load(Ordering::Relaxed)
    }

    pub fn renders_failed(&self) -> u64 {
        self.renders_failed.load(Ordering::Relaxed)
    }

    /// Reset all counters to zero (useful in tests).
    pub fn reset(&self) {
        self.evaluations_completed.store(0, Ordering::Relaxed);
        self.evaluations_failed.store(0, Ordering::Relaxed);
        self.renders_completed.store(0, Ordering::Relaxed);
        self.renders_failed.store(0, Ordering::Relaxed);
    }
}
