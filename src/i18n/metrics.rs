//! Resolution metrics.
//!
//! Counts how resolution calls end. Counters are atomic so a settled
//! registry can be shared across threads and still record outcomes.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Per-registry resolution counters.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    /// Calls that produced a localized message
    resolved: AtomicUsize,

    /// Calls rejected because of an unknown language code
    unknown_language: AtomicUsize,

    /// Calls whose text matched no template
    no_match: AtomicUsize,

    /// Calls that matched a template without a translation for the language
    missing_translation: AtomicUsize,
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_resolved(&self) {
        self.resolved.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unknown_language(&self) {
        self.unknown_language.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_no_match(&self) {
        self.no_match.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_missing_translation(&self) {
        self.missing_translation.fetch_add(1, Ordering::Relaxed);
    }

    pub fn resolved(&self) -> usize {
        self.resolved.load(Ordering::Relaxed)
    }

    pub fn unknown_language(&self) -> usize {
        self.unknown_language.load(Ordering::Relaxed)
    }

    pub fn no_match(&self) -> usize {
        self.no_match.load(Ordering::Relaxed)
    }

    pub fn missing_translation(&self) -> usize {
        self.missing_translation.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let resolved = self.resolved();
        let unknown_language = self.unknown_language();
        let no_match = self.no_match();
        let missing_translation = self.missing_translation();

        let attempts = resolved + unknown_language + no_match + missing_translation;
        let resolution_rate = if attempts > 0 {
            (resolved as f64 / attempts as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            attempts,
            resolved,
            unknown_language,
            no_match,
            missing_translation,
            resolution_rate,
        }
    }

    /// Reset all counters to zero.
    #[cfg(test)]
    pub fn reset(&self) {
        self.resolved.store(0, Ordering::Relaxed);
        self.unknown_language.store(0, Ordering::Relaxed);
        self.no_match.store(0, Ordering::Relaxed);
        self.missing_translation.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of resolution statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Total resolution calls
    pub attempts: usize,

    pub resolved: usize,

    pub unknown_language: usize,

    pub no_match: usize,

    pub missing_translation: usize,

    /// Share of calls that produced a message, as a percentage (0-100)
    pub resolution_rate: f64,
}
