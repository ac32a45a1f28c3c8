//! Candle geometry primitives shared across the classifiers.
//!
//! Thresholds are fixed constants of the algorithm, not runtime tunables. All
//! ratio tests guard degenerate geometry (zero range, zero body) by treating the
//! condition as not met rather than dividing by zero.

use crate::candle::Candle;

// ============================================================
// THRESHOLDS
// ============================================================

/// Body is small: body <= SMALL_BODY_PCT percent of the high-low range.
pub const SMALL_BODY_PCT: f64 = 25.0;
/// Body is large: body >= LARGE_BODY_PCT percent of the high-low range.
pub const LARGE_BODY_PCT: f64 = 75.0;
/// Relaxed large/small threshold used by the star patterns.
pub const STAR_BODY_PCT: f64 = 50.0;
/// Wick asymmetry for the hammer family: short wick * 4 < long wick.
pub const WICK_ASYMMETRY: f64 = 4.0;
/// Wick is small: wick <= SMALL_WICK_PCT percent of the body.
pub const SMALL_WICK_PCT: f64 = 25.0;

// ============================================================
// LENGTHS
// ============================================================

/// Body length measured in a fixed direction: `open - close`, or `close - open`
/// when `inverted`. Negative when the candle is colored against the chosen
/// orientation; the oriented tests below reject negative bodies.
#[inline]
pub fn signed_body_len(candle: &Candle, inverted: bool) -> f64 {
    if inverted {
        candle.close - candle.open
    } else {
        candle.open - candle.close
    }
}

/// Absolute body length `|open - close|`.
#[inline]
pub fn body_len(candle: &Candle) -> f64 {
    (candle.open - candle.close).abs()
}

/// Total length `high - low`.
#[inline]
pub fn total_len(candle: &Candle) -> f64 {
    candle.high - candle.low
}

/// Midpoint of the high-low range.
#[inline]
pub fn midpoint(candle: &Candle) -> f64 {
    (candle.low + candle.high) / 2.0
}

/// Upper wick length `high - max(open, close)`.
#[inline]
pub fn upper_wick(candle: &Candle) -> f64 {
    candle.high - candle.open.max(candle.close)
}

/// Lower wick length `min(open, close) - low`.
#[inline]
pub fn lower_wick(candle: &Candle) -> f64 {
    candle.open.min(candle.close) - candle.low
}

// ============================================================
// BODY TESTS
// ============================================================

/// Small-body test on precomputed lengths: a zero body is always small,
/// otherwise the body must be at most [`SMALL_BODY_PCT`] percent of the total.
/// A zero total with a nonzero body is not small (no division).
#[inline]
pub fn has_small_body(body: f64, total: f64) -> bool {
    if body == 0.0 {
        return true;
    }
    total > 0.0 && body / total * 100.0 <= SMALL_BODY_PCT
}

/// Oriented small-body test used by the spinning tops and the hammer family.
/// Rejects bodies colored against the orientation (`body < 0`) and full-range
/// bodies (`body == total`, which also excludes zero-range candles).
#[inline]
pub fn has_small_oriented_body(candle: &Candle, inverted: bool) -> bool {
    let body = signed_body_len(candle, inverted);
    let total = total_len(candle);
    if body < 0.0 || body == total {
        return false;
    }
    has_small_body(body, total)
}

/// Small-body test against an explicit threshold, on the absolute body. Used
/// by the star patterns, which accept a middle candle of either color.
#[inline]
pub fn has_small_body_within(candle: &Candle, threshold_pct: f64) -> bool {
    let body = body_len(candle);
    if body == 0.0 {
        return true;
    }
    let total = total_len(candle);
    total > 0.0 && body / total * 100.0 <= threshold_pct
}

/// Large-body test: the body occupies at least `threshold_pct` percent of the
/// total length. Zero-range candles are never large-bodied.
#[inline]
pub fn has_large_body(candle: &Candle, threshold_pct: f64) -> bool {
    let total = total_len(candle);
    total > 0.0 && body_len(candle) / total * 100.0 >= threshold_pct
}

// ============================================================
// WICK TESTS
// ============================================================

/// Upper wick at most [`SMALL_WICK_PCT`] percent of the body. A zero body
/// yields false.
#[inline]
pub fn small_upper_wick(candle: &Candle) -> bool {
    let body = body_len(candle);
    body > 0.0 && upper_wick(candle) / body * 100.0 <= SMALL_WICK_PCT
}

/// Lower wick at most [`SMALL_WICK_PCT`] percent of the body. A zero body
/// yields false.
#[inline]
pub fn small_lower_wick(candle: &Candle) -> bool {
    let body = body_len(candle);
    body > 0.0 && lower_wick(candle) / body * 100.0 <= SMALL_WICK_PCT
}

// ============================================================
// SLOPE
// ============================================================

/// Absolute slope between two y values separated by `dx` ticks, scaled by 100.
/// One tick equals 1.0; `dx == 0` soft-fails to 0.0.
#[inline]
pub fn abs_slope_pct(y1: f64, y2: f64, dx: f64) -> f64 {
    if dx == 0.0 {
        return 0.0;
    }
    ((y2 - y1) / dx * 100.0).abs()
}

// ============================================================
// TESTS
// ============================================================
