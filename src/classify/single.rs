//! Single-candle pattern rules.
//!
//! Twelve rules over one freshly constructed candle: the spinning tops, the
//! hammer family, the marabozus, and the doji variants. Every candle is
//! admitted to the registry exactly once, whether or not a rule matched;
//! admission also fixes the candle's bullish/bearish coloring.

use crate::candle::{Candle, PatternId};
use crate::geometry::{
    has_small_oriented_body, lower_wick, midpoint, upper_wick, WICK_ASYMMETRY,
};
use crate::registry::PatternRegistry;

pub const WHITE_SPINNING_TOP: PatternId = PatternId("White Spinning Top");
pub const BLACK_SPINNING_TOP: PatternId = PatternId("Black Spinning Top");
pub const HANGING_MAN: PatternId = PatternId("Hanging Man");
pub const HAMMER: PatternId = PatternId("Hammer");
pub const INVERTED_HAMMER: PatternId = PatternId("Inverted Hammer");
pub const SHOOTING_STAR: PatternId = PatternId("Shooting Star");
pub const WHITE_MARABOZU: PatternId = PatternId("White Marabozu");
pub const BLACK_MARABOZU: PatternId = PatternId("Black Marabozu");
pub const LONG_LEGGED_DOJI: PatternId = PatternId("Long Legged Doji");
pub const DRAGONFLY_DOJI: PatternId = PatternId("Dragonfly Doji");
pub const GRAVESTONE_DOJI: PatternId = PatternId("Gravestone Doji");
pub const FOUR_PRICE_DOJI: PatternId = PatternId("Four Price Doji");

/// One single-candle rule: a pattern identifier and its predicate.
#[derive(Clone, Copy)]
pub struct SingleRule {
    pub id: PatternId,
    pub test: fn(&Candle) -> bool,
}

/// Ordered single-candle rule list, first match wins.
pub struct SingleClassifier {
    rules: Vec<SingleRule>,
}

impl Default for SingleClassifier {
    fn default() -> Self {
        Self {
            rules: vec![
                SingleRule { id: WHITE_SPINNING_TOP, test: white_spinning_top },
                SingleRule { id: BLACK_SPINNING_TOP, test: black_spinning_top },
                SingleRule { id: HANGING_MAN, test: hanging_man },
                SingleRule { id: HAMMER, test: hammer },
                SingleRule { id: INVERTED_HAMMER, test: inverted_hammer },
                SingleRule { id: SHOOTING_STAR, test: shooting_star },
                SingleRule { id: WHITE_MARABOZU, test: white_marabozu },
                SingleRule { id: BLACK_MARABOZU, test: black_marabozu },
                SingleRule { id: LONG_LEGGED_DOJI, test: long_legged_doji },
                SingleRule { id: DRAGONFLY_DOJI, test: dragonfly_doji },
                SingleRule { id: GRAVESTONE_DOJI, test: gravestone_doji },
                SingleRule { id: FOUR_PRICE_DOJI, test: four_price_doji },
            ],
        }
    }
}

impl SingleClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[SingleRule] {
        &self.rules
    }

    /// Evaluate the rules against `candle` and admit it to the registry.
    /// Returns true when a rule matched.
    pub fn classify(&self, registry: &mut PatternRegistry, candle: Candle) -> bool {
        let label = self
            .rules
            .iter()
            .find(|rule| (rule.test)(&candle))
            .map(|rule| rule.id);
        let matched = label.is_some();
        registry.admit_single(candle, label);
        matched
    }
}

// ============================================================
// SPINNING TOPS
// ============================================================

/// Small bullish body with the range midpoint strictly inside it. Signals
/// indecision; buyers could not push a significant move.
fn white_spinning_top(candle: &Candle) -> bool {
    has_small_oriented_body(candle, true) && {
        let mid = midpoint(candle);
        candle.open < mid && mid < candle.close
    }
}

/// Small bearish body with the range midpoint strictly inside it.
fn black_spinning_top(candle: &Candle) -> bool {
    has_small_oriented_body(candle, false) && {
        let mid = midpoint(candle);
        candle.close < mid && mid < candle.open
    }
}

// ============================================================
// HAMMER FAMILY
// ============================================================

/// Small bearish body, lower wick at least four times the upper wick.
/// Marks a potential top: sellers are starting to outnumber buyers.
fn hanging_man(candle: &Candle) -> bool {
    has_small_oriented_body(candle, false)
        && upper_wick(candle) * WICK_ASYMMETRY < lower_wick(candle)
        && candle.close != candle.open
}

/// Small bullish body, lower wick at least four times the upper wick.
/// The bullish counterpart of the hanging man, typically seen in downtrends.
fn hammer(candle: &Candle) -> bool {
    has_small_oriented_body(candle, true)
        && upper_wick(candle) * WICK_ASYMMETRY < lower_wick(candle)
        && candle.close != candle.open
}

/// Small bullish body, upper wick at least four times the lower wick.
fn inverted_hammer(candle: &Candle) -> bool {
    has_small_oriented_body(candle, true)
        && lower_wick(candle) * WICK_ASYMMETRY < upper_wick(candle)
        && candle.close != candle.open
}

/// Small bearish body, upper wick at least four times the lower wick.
/// The bearish counterpart of the inverted hammer, typically seen in uptrends.
fn shooting_star(candle: &Candle) -> bool {
    has_small_oriented_body(candle, false)
        && lower_wick(candle) * WICK_ASYMMETRY < upper_wick(candle)
        && candle.close != candle.open
}

// ============================================================
// MARABOZUS
// ============================================================

/// Opened at the low, closed at the high: buyers in full control.
fn white_marabozu(candle: &Candle) -> bool {
    candle.high == candle.close && candle.low == candle.open && candle.low != candle.high
}

/// Opened at the high, closed at the low: sellers in full control.
fn black_marabozu(candle: &Candle) -> bool {
    candle.high == candle.open && candle.low == candle.close && candle.low != candle.high
}

// ============================================================
// DOJI VARIANTS
// ============================================================

/// Open equals close with distance to both high and low.
fn long_legged_doji(candle: &Candle) -> bool {
    (candle.low < candle.close && candle.close == candle.open && candle.open < candle.high)
        || (candle.high < candle.close && candle.close == candle.open && candle.open < candle.low)
}

/// Open, close and high all equal; only the low stands apart.
fn dragonfly_doji(candle: &Candle) -> bool {
    candle.open == candle.close && candle.close == candle.high && candle.high != candle.low
}

/// Open, close and low all equal; only the high stands apart.
fn gravestone_doji(candle: &Candle) -> bool {
    candle.open == candle.close && candle.close == candle.low && candle.low != candle.high
}

/// All four prices equal.
fn four_price_doji(candle: &Candle) -> bool {
    candle.open == candle.close && candle.close == candle.high && candle.high == candle.low
}

// ============================================================
// TESTS
// ============================================================
