//! The shared pattern registry.
//!
//! One `PatternRegistry` instance is owned by the simulation driver and passed
//! by reference into every classifier operation. It holds the chronological
//! sequence of classified candles, insertion-ordered hit lists for the dual and
//! triple arities, and the detected trendlines. Append-only: candles are never
//! reordered or removed, and each per-arity label is written at most once.

use chrono::{DateTime, Utc};

use crate::candle::{Candle, ExtremaMark, PatternId, Signal, NO_PATTERN};
use crate::trend::Trendline;

/// One dual- or triple-arity match: the index of a participating candle in the
/// chronological sequence plus the matched pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternHit {
    pub index: usize,
    pub pattern: PatternId,
}

/// Append-only store of classification results for one simulation run.
///
/// Lifetime is the run itself; nothing is persisted. Downstream readers query
/// it after the sequential pass completes, so no synchronization is needed.
#[derive(Debug, Default)]
pub struct PatternRegistry {
    singles: Vec<Candle>,
    duals: Vec<PatternHit>,
    triples: Vec<PatternHit>,
    trendlines: Vec<Trendline>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chronological sequence of all admitted candles.
    #[inline]
    pub fn singles(&self) -> &[Candle] {
        &self.singles
    }

    /// Dual-arity hits in order of detection.
    #[inline]
    pub fn duals(&self) -> &[PatternHit] {
        &self.duals
    }

    /// Triple-arity hits in order of detection.
    #[inline]
    pub fn triples(&self) -> &[PatternHit] {
        &self.triples
    }

    /// Detected trendlines in order of detection.
    #[inline]
    pub fn trendlines(&self) -> &[Trendline] {
        &self.trendlines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.singles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.singles.is_empty()
    }

    // ===========================================
    // Append operations (classifier-facing)
    // ===========================================

    /// Admit a freshly classified candle. Sets the coloring flags and the
    /// single-arity label, then appends. Every candle is admitted exactly once,
    /// labeled or not.
    pub(crate) fn admit_single(&mut self, mut candle: Candle, label: Option<PatternId>) {
        if candle.open < candle.close {
            candle.bullish = true;
        } else if candle.open > candle.close {
            candle.bearish = true;
        }
        candle.single_pattern = label;
        if let Some(id) = label {
            tracing::info!(pattern = %id, ts = %candle.ts, "single pattern detected");
        }
        self.singles.push(candle);
    }

    /// Record a dual-arity match on the two most recent candles. The label is
    /// written onto each candle only if that arity is still unset.
    pub(crate) fn record_dual(&mut self, pattern: PatternId) {
        let len = self.singles.len();
        debug_assert!(len >= 2);
        for index in len - 2..len {
            let candle = &mut self.singles[index];
            if candle.dual_pattern.is_none() {
                candle.dual_pattern = Some(pattern);
            }
            tracing::info!(pattern = %pattern, ts = %candle.ts, "dual pattern detected");
            self.duals.push(PatternHit { index, pattern });
        }
    }

    /// Record a triple-arity match on the three most recent candles.
    pub(crate) fn record_triple(&mut self, pattern: PatternId) {
        let len = self.singles.len();
        debug_assert!(len >= 3);
        for index in len - 3..len {
            let candle = &mut self.singles[index];
            if candle.triple_pattern.is_none() {
                candle.triple_pattern = Some(pattern);
            }
            tracing::info!(pattern = %pattern, ts = %candle.ts, "triple pattern detected");
            self.triples.push(PatternHit { index, pattern });
        }
    }

    pub(crate) fn record_trendline(&mut self, trendline: Trendline) {
        self.trendlines.push(trendline);
    }

    /// The two most recent candles as `[prev, cur]`, if at least two exist.
    pub(crate) fn last_two(&self) -> Option<(&Candle, &Candle)> {
        let len = self.singles.len();
        if len < 2 {
            return None;
        }
        Some((&self.singles[len - 2], &self.singles[len - 1]))
    }

    /// The three most recent candles as `[c1, c2, c3]`, if at least three exist.
    pub(crate) fn last_three(&self) -> Option<(&Candle, &Candle, &Candle)> {
        let len = self.singles.len();
        if len < 3 {
            return None;
        }
        Some((
            &self.singles[len - 3],
            &self.singles[len - 2],
            &self.singles[len - 1],
        ))
    }

    // ===========================================
    // Extrema marking (tracker-facing)
    // ===========================================

    /// Flag the lowest low / highest high of the last `n` candles as local
    /// extrema, unless the candidate sits on the boundary of the window of size
    /// `n + 2` ending at the current position. A boundary candle is in the
    /// middle of a move and cannot be confirmed as a turning point against both
    /// neighbors. Ties resolve to the earliest candidate.
    pub(crate) fn mark_local_extrema(&mut self, n: usize) {
        let len = self.singles.len();
        if len == 0 {
            return;
        }
        let start = len.saturating_sub(n);
        let mut min_idx = start;
        let mut max_idx = start;
        for i in start..len {
            if self.singles[i].low < self.singles[min_idx].low {
                min_idx = i;
            }
            if self.singles[i].high > self.singles[max_idx].high {
                max_idx = i;
            }
        }

        let window_first = len.saturating_sub(n + 2);
        let window_last = len - 1;
        if min_idx != window_first && min_idx != window_last {
            self.singles[min_idx].minima = true;
            tracing::info!(ts = %self.singles[min_idx].ts, "local minima marked");
        }
        if max_idx != window_first && max_idx != window_last {
            self.singles[max_idx].maxima = true;
            tracing::info!(ts = %self.singles[max_idx].ts, "local maxima marked");
        }
    }

    // ===========================================
    // Query interface (visualization-facing)
    // ===========================================

    /// Index of the first candle with the given timestamp, if present.
    /// Timestamps are non-decreasing, so a binary search applies.
    fn index_of(&self, ts: DateTime<Utc>) -> Option<usize> {
        let idx = self.singles.partition_point(|c| c.ts < ts);
        (idx < self.singles.len() && self.singles[idx].ts == ts).then_some(idx)
    }

    /// Single and dual pattern labels for a timestamp, `"None"` when the
    /// candle is unlabeled at that arity or the timestamp is unknown.
    pub fn labels_for(&self, ts: DateTime<Utc>) -> (&'static str, &'static str) {
        match self.index_of(ts) {
            Some(idx) => {
                let candle = &self.singles[idx];
                (
                    candle.single_pattern.map_or(NO_PATTERN, |id| id.as_str()),
                    candle.dual_pattern.map_or(NO_PATTERN, |id| id.as_str()),
                )
            }
            None => (NO_PATTERN, NO_PATTERN),
        }
    }

    /// Directional signal for a timestamp; [`Signal::Undetermined`] when the
    /// timestamp is absent from the registry.
    pub fn signal_for(&self, ts: DateTime<Utc>) -> Signal {
        match self.index_of(ts) {
            Some(idx) => self.singles[idx].signal(),
            None => Signal::Undetermined,
        }
    }

    /// Extrema marking for a timestamp; [`ExtremaMark::None`] when absent.
    pub fn extrema_for(&self, ts: DateTime<Utc>) -> ExtremaMark {
        match self.index_of(ts) {
            Some(idx) => self.singles[idx].extrema_mark(),
            None => ExtremaMark::None,
        }
    }
}

// ============================================================
// TESTS
// ============================================================
