//! Triple-candle pattern rules.
//!
//! Six rules over the three most recent admitted candles `[c1, c2, c3]`. A
//! no-op while fewer than three candles exist. On a match all three candles
//! receive the triple label and all three are appended to the triple hit list.

use crate::candle::{Candle, PatternId};
use crate::geometry::{
    has_large_body, has_small_body_within, midpoint, small_lower_wick, small_upper_wick,
    LARGE_BODY_PCT, STAR_BODY_PCT,
};
use crate::registry::PatternRegistry;

pub const MORNING_STAR: PatternId = PatternId("Morning star");
pub const EVENING_STAR: PatternId = PatternId("Evening star");
pub const THREE_WHITE_SOLDIERS: PatternId = PatternId("Three white soldiers");
pub const BLACK_CROWS: PatternId = PatternId("Black crows");
pub const THREE_INSIDE_UP: PatternId = PatternId("Three inside up");
pub const THREE_INSIDE_DOWN: PatternId = PatternId("Three inside down");

/// One triple-candle rule: a pattern identifier and its predicate over
/// `[c1, c2, c3]`.
#[derive(Clone, Copy)]
pub struct TripleRule {
    pub id: PatternId,
    pub test: fn(&Candle, &Candle, &Candle) -> bool,
}

/// Ordered triple-candle rule list, first match wins.
pub struct TripleClassifier {
    rules: Vec<TripleRule>,
}

impl Default for TripleClassifier {
    fn default() -> Self {
        Self {
            rules: vec![
                TripleRule { id: MORNING_STAR, test: morning_star },
                TripleRule { id: EVENING_STAR, test: evening_star },
                TripleRule { id: THREE_WHITE_SOLDIERS, test: three_white_soldiers },
                TripleRule { id: BLACK_CROWS, test: black_crows },
                TripleRule { id: THREE_INSIDE_UP, test: three_inside_up },
                TripleRule { id: THREE_INSIDE_DOWN, test: three_inside_down },
            ],
        }
    }
}

impl TripleClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[TripleRule] {
        &self.rules
    }

    /// Evaluate the rules against the three most recent candles. Returns false
    /// without side effects when fewer than three candles exist.
    pub fn classify(&self, registry: &mut PatternRegistry) -> bool {
        let hit = {
            let Some((c1, c2, c3)) = registry.last_three() else {
                return false;
            };
            self.rules
                .iter()
                .find(|rule| (rule.test)(c1, c2, c3))
                .map(|rule| rule.id)
        };
        match hit {
            Some(id) => {
                registry.record_triple(id);
                true
            }
            None => false,
        }
    }
}

// ============================================================
// STARS
// ============================================================

/// Bullish reversal: a long black candle, a short middle candle, then a long
/// white candle closing above the first candle's midpoint.
fn morning_star(c1: &Candle, c2: &Candle, c3: &Candle) -> bool {
    let first = c1.bearish && has_large_body(c1, STAR_BODY_PCT);
    let middle = has_small_body_within(c2, STAR_BODY_PCT);
    let third = c3.bullish
        && has_large_body(c3, STAR_BODY_PCT)
        && c3.high > c3.close
        && c3.close > midpoint(c1);
    first && middle && third
}

/// Bearish reversal, the mirror of the morning star: a long white candle, a
/// short middle candle, then a long black candle opening above the first
/// candle's midpoint.
fn evening_star(c1: &Candle, c2: &Candle, c3: &Candle) -> bool {
    let first = c1.bullish && has_large_body(c1, STAR_BODY_PCT);
    let middle = has_small_body_within(c2, STAR_BODY_PCT);
    let third = c3.bearish
        && has_large_body(c3, STAR_BODY_PCT)
        && c3.low < c3.open
        && c3.open > midpoint(c1);
    first && middle && third
}

// ============================================================
// SOLDIERS / CROWS
// ============================================================

/// Three long white candles marching upward: each opens beyond the previous
/// candle's midpoint, highs strictly ascend, upper wicks stay small.
fn three_white_soldiers(c1: &Candle, c2: &Candle, c3: &Candle) -> bool {
    let all_long_white = c1.bullish
        && c2.bullish
        && c3.bullish
        && has_large_body(c1, LARGE_BODY_PCT)
        && has_large_body(c2, LARGE_BODY_PCT)
        && has_large_body(c3, LARGE_BODY_PCT);
    let staircase = c2.open > midpoint(c1) && c3.open > midpoint(c2);
    let ascending = c1.high < c2.high && c2.high < c3.high;
    let clean_tops = small_upper_wick(c1) && small_upper_wick(c2) && small_upper_wick(c3);
    all_long_white && staircase && ascending && clean_tops
}

/// Three long black candles marching downward: the mirror of the soldiers.
fn black_crows(c1: &Candle, c2: &Candle, c3: &Candle) -> bool {
    let all_long_black = c1.bearish
        && c2.bearish
        && c3.bearish
        && has_large_body(c1, LARGE_BODY_PCT)
        && has_large_body(c2, LARGE_BODY_PCT)
        && has_large_body(c3, LARGE_BODY_PCT);
    let staircase = c2.open < midpoint(c1) && c3.open < midpoint(c2);
    let descending = c1.low > c2.low && c2.low > c3.low;
    let clean_bottoms = small_lower_wick(c1) && small_lower_wick(c2) && small_lower_wick(c3);
    all_long_black && staircase && descending && clean_bottoms
}

// ============================================================
// THREE INSIDE
// ============================================================
// TODO: both formations need the prevailing trend as an input before they can
// be expressed; wire them to the trendline registry once the trend context is
// available per candle. Until then they never match.

fn three_inside_up(_c1: &Candle, _c2: &Candle, _c3: &Candle) -> bool {
    false
}

fn three_inside_down(_c1: &Candle, _c2: &Candle, _c3: &Candle) -> bool {
    false
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candle::Candle;
    use crate::classify::single::SingleClassifier;
    use chrono::{TimeZone, Utc};

    fn candle_at(t: i64, o: f64, h: f64, l: f64, c: f64) -> Candle {
        Candle {
            open: o,
            close: c,
            high: h,
            low: l,
            ts: Utc.timestamp_opt(t, 0).unwrap(),
            bullish: false,
            bearish: false,
            minima: false,
            maxima: false,
            single_pattern: None,
            dual_pattern: None,
            triple_pattern: None,
        }
    }

    fn feed(registry: &mut PatternRegistry, candles: Vec<Candle>) {
        let single = SingleClassifier::new();
        for candle in candles {
            single.classify(registry, candle);
        }
    }

    #[test]
    fn noop_below_three_candles() {
        let triple = TripleClassifier::new();
        let mut registry = PatternRegistry::new();
        assert!(!triple.classify(&mut registry));
        feed(
            &mut registry,
            vec![
                candle_at(1, 1.0, 2.0, 0.5, 1.5),
                candle_at(2, 1.5, 2.0, 0.5, 1.0),
            ],
        );
        assert!(!triple.classify(&mut registry));
        assert!(registry.triples().is_empty());
    }

    #[test]
    fn morning_star_fires() {
        let mut registry = PatternRegistry::new();
        feed(
            &mut registry,
            vec![
                // long black: body 8 of range 10
                candle_at(1, 109.0, 110.0, 100.0, 101.0),
                // short middle
                candle_at(2, 100.5, 101.5, 99.5, 100.8),
                // long white closing above c1's midpoint (105), high > close
                candle_at(3, 101.0, 110.0, 100.5, 109.0),
            ],
        );
        let triple = TripleClassifier::new();
        assert!(triple.classify(&mut registry));
        let singles = registry.singles();
        assert!(singles.iter().all(|c| c.triple_pattern == Some(MORNING_STAR)));
        assert_eq!(registry.triples().len(), 3);
    }

    #[test]
    fn evening_star_fires() {
        let mut registry = PatternRegistry::new();
        feed(
            &mut registry,
            vec![
                // long white
                candle_at(1, 101.0, 110.0, 100.0, 109.0),
                // short middle
                candle_at(2, 109.2, 110.5, 108.5, 109.5),
                // long black opening above c1's midpoint (105)
                candle_at(3, 109.0, 110.0, 100.0, 101.0),
            ],
        );
        let triple = TripleClassifier::new();
        assert!(triple.classify(&mut registry));
        assert_eq!(
            registry.singles()[0].triple_pattern,
            Some(EVENING_STAR)
        );
    }

    #[test]
    fn three_white_soldiers_fire() {
        let mut registry = PatternRegistry::new();
        feed(
            &mut registry,
            vec![
                candle_at(1, 100.0, 110.0, 99.5, 109.0),
                candle_at(2, 106.0, 116.0, 105.5, 115.0),
                candle_at(3, 112.0, 122.0, 111.5, 121.0),
            ],
        );
        let triple = TripleClassifier::new();
        assert!(triple.classify(&mut registry));
        assert_eq!(
            registry.singles()[2].triple_pattern,
            Some(THREE_WHITE_SOLDIERS)
        );
    }

    #[test]
    fn soldiers_need_ascending_highs() {
        let mut registry = PatternRegistry::new();
        feed(
            &mut registry,
            vec![
                candle_at(1, 100.0, 110.0, 99.5, 109.0),
                candle_at(2, 106.0, 116.0, 105.5, 115.0),
                // third high fails to exceed the second
                candle_at(3, 112.0, 116.0, 111.5, 115.5),
            ],
        );
        let triple = TripleClassifier::new();
        assert!(!triple.classify(&mut registry));
    }

    #[test]
    fn black_crows_fire() {
        let mut registry = PatternRegistry::new();
        feed(
            &mut registry,
            vec![
                candle_at(1, 121.0, 121.5, 111.0, 112.0),
                candle_at(2, 115.0, 115.5, 105.0, 106.0),
                candle_at(3, 109.0, 109.5, 99.0, 100.0),
            ],
        );
        let triple = TripleClassifier::new();
        assert!(triple.classify(&mut registry));
        assert_eq!(registry.singles()[0].triple_pattern, Some(BLACK_CROWS));
    }

    #[test]
    fn three_inside_stubs_never_match() {
        let mut registry = PatternRegistry::new();
        feed(
            &mut registry,
            vec![
                candle_at(1, 1.0, 2.0, 0.5, 1.5),
                candle_at(2, 1.5, 2.0, 0.5, 1.0),
                candle_at(3, 1.0, 2.0, 0.5, 1.5),
            ],
        );
        let triple = TripleClassifier::new();
        // neither stub matches, and nothing else applies to these shapes
        assert!(!triple.classify(&mut registry));
        assert!(registry.triples().is_empty());
    }
}
