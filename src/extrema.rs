//! Local extrema tracking.
//!
//! The tracker is the only component allowed to set the minima/maxima flags on
//! admitted candles. The driver invokes it periodically; marking itself is a
//! scan over the registry's trailing window.

use crate::registry::PatternRegistry;

/// Marks local minima and maxima over a trailing window of admitted candles.
#[derive(Debug, Clone, Copy)]
pub struct ExtremaTracker {
    /// Number of trailing candles scanned for extrema candidates.
    pub window: usize,
}

impl Default for ExtremaTracker {
    fn default() -> Self {
        Self { window: 10 }
    }
}

impl ExtremaTracker {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// Flag the current window's extrema candidates on the registry.
    pub fn mark(&self, registry: &mut PatternRegistry) {
        registry.mark_local_extrema(self.window);
    }
}
