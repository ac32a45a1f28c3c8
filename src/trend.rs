//! Trendline detection over flagged extrema.
//!
//! A downtrend is a steep enough slope between a previously flagged local
//! maximum and the current candle's high; an uptrend the same between a local
//! minimum and the current low. Slopes are measured in index distance (one
//! candle = one tick) and scaled by 100.

use chrono::{DateTime, Utc};

use crate::geometry::abs_slope_pct;
use crate::registry::PatternRegistry;

/// Direction of a detected trendline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum TrendDirection {
    Up,
    Down,
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TrendDirection::Up => "uptrend",
            TrendDirection::Down => "downtrend",
        })
    }
}

/// One detected trendline between an extremum and the current candle.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Trendline {
    pub direction: TrendDirection,
    pub start_ts: DateTime<Utc>,
    pub end_ts: DateTime<Utc>,
    pub slope: f64,
}

/// Computes slopes between flagged extrema and the current candle, recording a
/// trendline whenever the absolute slope exceeds the threshold.
#[derive(Debug, Clone, Copy)]
pub struct TrendDetector {
    /// Required absolute slope level (already scaled by 100).
    pub slope_threshold: f64,
}

impl TrendDetector {
    pub fn new(slope_threshold: f64) -> Self {
        Self { slope_threshold }
    }

    /// Run both directions over the trailing `lookback` candles.
    pub fn detect(&self, registry: &mut PatternRegistry, lookback: usize) {
        self.detect_direction(registry, lookback, TrendDirection::Up);
        self.detect_direction(registry, lookback, TrendDirection::Down);
    }

    /// Collect the flagged extrema of the matching kind in the history slice
    /// (excluding the current candle, which cannot be its own trend anchor)
    /// and record a trendline for each one whose slope to the current candle
    /// clears the threshold.
    fn detect_direction(
        &self,
        registry: &mut PatternRegistry,
        lookback: usize,
        direction: TrendDirection,
    ) {
        let singles = registry.singles();
        let len = singles.len();
        if len < 2 {
            return;
        }
        let start = len.saturating_sub(lookback);
        let current = &singles[len - 1];

        let mut found = Vec::new();
        for (i, candle) in singles.iter().enumerate().take(len - 1).skip(start) {
            let anchored = match direction {
                TrendDirection::Up => candle.minima,
                TrendDirection::Down => candle.maxima,
            };
            if !anchored {
                continue;
            }
            let (y1, y2) = match direction {
                TrendDirection::Up => (candle.low, current.low),
                TrendDirection::Down => (candle.high, current.high),
            };
            let slope = abs_slope_pct(y1, y2, (len - 1 - i) as f64);
            if slope > self.slope_threshold {
                tracing::info!(
                    %direction,
                    start = %candle.ts,
                    end = %current.ts,
                    slope,
                    "trendline detected"
                );
                found.push(Trendline {
                    direction,
                    start_ts: candle.ts,
                    end_ts: current.ts,
                    slope,
                });
            }
        }

        for trendline in found {
            registry.record_trendline(trendline);
        }
    }
}

// ============================================================
// TESTS
// ============================================================
