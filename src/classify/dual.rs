//! Dual-candle pattern rules.
//!
//! Six rules over the two most recent admitted candles `[prev, cur]`. A no-op
//! while fewer than two candles exist. On a match both candles receive the
//! dual label and both are appended to the dual hit list.

use crate::candle::{Candle, PatternId};
use crate::classify::single::{
    BLACK_MARABOZU, DRAGONFLY_DOJI, FOUR_PRICE_DOJI, GRAVESTONE_DOJI, LONG_LEGGED_DOJI,
    WHITE_MARABOZU,
};
use crate::geometry::{body_len, total_len};
use crate::registry::PatternRegistry;

pub const WHITE_MARABOZU_DOJI: PatternId = PatternId("White Marabozu Doji");
pub const BLACK_MARABOZU_DOJI: PatternId = PatternId("Black Marabozu Doji");
pub const TWEEZER_BOTTOM: PatternId = PatternId("Tweezer Bottom");
pub const TWEEZER_TOP: PatternId = PatternId("Tweezer Top");
pub const BULLISH_ENGULFING: PatternId = PatternId("Bullish Engulfing");
pub const BEARISH_ENGULFING: PatternId = PatternId("Bearish Engulfing");

/// One dual-candle rule: a pattern identifier and its predicate over
/// `[prev, cur]`.
#[derive(Clone, Copy)]
pub struct DualRule {
    pub id: PatternId,
    pub test: fn(&Candle, &Candle) -> bool,
}

/// Ordered dual-candle rule list, first match wins.
pub struct DualClassifier {
    rules: Vec<DualRule>,
}

impl Default for DualClassifier {
    fn default() -> Self {
        Self {
            rules: vec![
                DualRule { id: WHITE_MARABOZU_DOJI, test: white_marabozu_doji },
                DualRule { id: BLACK_MARABOZU_DOJI, test: black_marabozu_doji },
                DualRule { id: TWEEZER_BOTTOM, test: tweezer_bottom },
                DualRule { id: TWEEZER_TOP, test: tweezer_top },
                DualRule { id: BULLISH_ENGULFING, test: bullish_engulfing },
                DualRule { id: BEARISH_ENGULFING, test: bearish_engulfing },
            ],
        }
    }
}

impl DualClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[DualRule] {
        &self.rules
    }

    /// Evaluate the rules against the two most recent candles. Returns false
    /// without side effects when fewer than two candles exist.
    pub fn classify(&self, registry: &mut PatternRegistry) -> bool {
        let hit = {
            let Some((prev, cur)) = registry.last_two() else {
                return false;
            };
            self.rules
                .iter()
                .find(|rule| (rule.test)(prev, cur))
                .map(|rule| rule.id)
        };
        match hit {
            Some(id) => {
                registry.record_dual(id);
                true
            }
            None => false,
        }
    }
}

// ============================================================
// MARABOZU -> DOJI REVERSALS
// ============================================================

fn is_doji_variant(candle: &Candle) -> bool {
    matches!(
        candle.single_pattern,
        Some(id) if id == LONG_LEGGED_DOJI
            || id == DRAGONFLY_DOJI
            || id == GRAVESTONE_DOJI
            || id == FOUR_PRICE_DOJI
    )
}

/// A white marabozu followed by any doji: buyers are becoming exhausted and
/// the advance is stalling.
fn white_marabozu_doji(prev: &Candle, cur: &Candle) -> bool {
    prev.single_pattern == Some(WHITE_MARABOZU) && is_doji_variant(cur)
}

/// A black marabozu followed by any doji: sellers are becoming exhausted.
fn black_marabozu_doji(prev: &Candle, cur: &Candle) -> bool {
    prev.single_pattern == Some(BLACK_MARABOZU) && is_doji_variant(cur)
}

// ============================================================
// TWEEZERS
// ============================================================

/// Opposite coloring on both flags at once. Neutral candles (neither flag set)
/// fail the test against any partner, including another neutral candle.
fn opposite_coloring(prev: &Candle, cur: &Candle) -> bool {
    prev.bearish != cur.bearish && prev.bullish != cur.bullish
}

/// Two candles of opposite color sharing the same low, one of them already
/// flagged as a local minimum.
fn tweezer_bottom(prev: &Candle, cur: &Candle) -> bool {
    prev.low == cur.low && opposite_coloring(prev, cur) && (prev.minima || cur.minima)
}

/// Two candles of opposite color sharing the same high, one of them already
/// flagged as a local maximum.
fn tweezer_top(prev: &Candle, cur: &Candle) -> bool {
    prev.high == cur.high && opposite_coloring(prev, cur) && (prev.maxima || cur.maxima)
}

// ============================================================
// ENGULFING
// ============================================================
// TODO: confirm with the system owner whether engulfing should additionally
// require one of the two candles to sit on a flagged extremum, as the
// tweezers do.

/// A bearish candle whose body is swallowed by the following bullish candle's
/// range.
fn bullish_engulfing(prev: &Candle, cur: &Candle) -> bool {
    prev.bearish && body_len(prev) < total_len(cur) && cur.bullish
}

/// A bullish candle whose body is swallowed by the following bearish candle's
/// range.
fn bearish_engulfing(prev: &Candle, cur: &Candle) -> bool {
    prev.bullish && body_len(prev) < total_len(cur) && cur.bearish
}

// ============================================================
// TESTS
// ============================================================
