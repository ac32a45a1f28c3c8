//! Integration tests for the pattern classification engine.
//!
//! Exercises the classifiers through the simulation driver the way the
//! backtest uses them, plus property tests for the structural invariants.

use candlesim::prelude::*;
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

fn row(t: i64, o: f64, h: f64, l: f64, c: f64) -> Row {
    Row {
        ts: Utc.timestamp_opt(t, 0).unwrap(),
        open: o,
        high: h,
        low: l,
        close: c,
        volume: 0.0,
    }
}

fn ts(t: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(t, 0).unwrap()
}

fn run(rows: &[Row]) -> Backtest {
    let mut backtest = Backtest::new(SimParams::default());
    backtest.run(rows);
    backtest
}

// ============================================================
// SINGLE-CANDLE SCENARIOS
// ============================================================

#[test]
fn four_price_doji_with_neutral_signal() {
    let backtest = run(&[row(1, 10.0, 10.0, 10.0, 10.0)]);
    let registry = backtest.registry();
    assert_eq!(registry.labels_for(ts(1)).0, "Four Price Doji");
    assert_eq!(registry.signal_for(ts(1)), Signal::Neutral);
}

#[test]
fn dragonfly_doji_when_high_equals_open_and_close() {
    let backtest = run(&[row(1, 5.0, 5.0, 1.0, 5.0)]);
    assert_eq!(backtest.registry().labels_for(ts(1)).0, "Dragonfly Doji");
}

#[test]
fn gravestone_doji_when_low_equals_open_and_close() {
    let backtest = run(&[row(1, 5.0, 9.0, 5.0, 5.0)]);
    assert_eq!(backtest.registry().labels_for(ts(1)).0, "Gravestone Doji");
}

#[test]
fn marabozu_colors() {
    let backtest = run(&[
        row(1, 10.0, 12.0, 10.0, 12.0),
        row(2, 22.0, 22.0, 20.0, 20.0),
    ]);
    let registry = backtest.registry();
    assert_eq!(registry.labels_for(ts(1)).0, "White Marabozu");
    assert_eq!(registry.signal_for(ts(1)), Signal::Bullish);
    assert_eq!(registry.labels_for(ts(2)).0, "Black Marabozu");
    assert_eq!(registry.signal_for(ts(2)), Signal::Bearish);
}

// ============================================================
// DUAL-CANDLE SCENARIOS
// ============================================================

#[test]
fn white_marabozu_doji_labels_both_candles() {
    let backtest = run(&[
        row(1, 10.0, 12.0, 10.0, 12.0), // White Marabozu
        row(2, 9.0, 11.0, 8.0, 9.0),    // Long Legged Doji
    ]);
    let registry = backtest.registry();
    assert_eq!(registry.labels_for(ts(1)).0, "White Marabozu");
    assert_eq!(registry.labels_for(ts(2)).0, "Long Legged Doji");
    assert_eq!(registry.labels_for(ts(1)).1, "White Marabozu Doji");
    assert_eq!(registry.labels_for(ts(2)).1, "White Marabozu Doji");
    assert_eq!(registry.duals().len(), 2);
}

#[test]
fn dual_classification_needs_two_candles() {
    let backtest = run(&[row(1, 10.0, 12.0, 10.0, 12.0)]);
    assert!(backtest.registry().duals().is_empty());
}

// ============================================================
// TRIPLE-CANDLE SCENARIOS
// ============================================================

#[test]
fn three_white_soldiers_label_all_three() {
    let backtest = run(&[
        row(0, 100.0, 101.0, 99.0, 100.5), // filler before the formation
        row(1, 100.0, 110.0, 99.5, 109.0),
        row(2, 106.0, 116.0, 105.5, 115.0),
        row(3, 112.0, 122.0, 111.5, 121.0),
    ]);
    let registry = backtest.registry();
    assert_eq!(registry.triples().len(), 3);
    for candle in &registry.singles()[1..] {
        assert_eq!(
            candle.triple_pattern.map(|p| p.as_str()),
            Some("Three white soldiers")
        );
    }
    assert!(registry.singles()[0].triple_pattern.is_none());
}

#[test]
fn triple_classification_needs_three_candles() {
    let backtest = run(&[
        row(1, 10.0, 12.0, 10.0, 12.0),
        row(2, 9.0, 11.0, 8.0, 9.0),
    ]);
    assert!(backtest.registry().triples().is_empty());
}

// ============================================================
// QUERY SENTINELS
// ============================================================

#[test]
fn absent_timestamp_yields_sentinels() {
    let backtest = run(&[row(1, 10.0, 10.0, 10.0, 10.0)]);
    let registry = backtest.registry();
    let missing = ts(999);
    assert_eq!(registry.labels_for(missing), (NO_PATTERN, NO_PATTERN));
    assert_eq!(registry.signal_for(missing), Signal::Undetermined);
    assert_eq!(registry.extrema_for(missing), ExtremaMark::None);
}

#[test]
fn unlabeled_candle_yields_none_labels() {
    // large-bodied candle with both wicks matches no single rule
    let backtest = run(&[row(1, 100.0, 111.0, 99.0, 110.0)]);
    let registry = backtest.registry();
    assert_eq!(registry.labels_for(ts(1)), (NO_PATTERN, NO_PATTERN));
    assert_eq!(registry.signal_for(ts(1)), Signal::Bullish);
}

// ============================================================
// PROPERTIES
// ============================================================

/// Sequences of well-formed OHLC rows: four arbitrary prices per row,
/// reshuffled so that high/low bound open/close.
fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(
        (1.0..1000.0f64, 1.0..1000.0f64, 1.0..1000.0f64, 1.0..1000.0f64),
        1..40,
    )
    .prop_map(|quads| {
        quads
            .into_iter()
            .enumerate()
            .map(|(i, (a, b, c, d))| {
                let high = a.max(b).max(c).max(d);
                let low = a.min(b).min(c).min(d);
                row(i as i64, a, high, low, d)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn coloring_flags_are_exclusive(rows in arb_rows()) {
        let backtest = run(&rows);
        for candle in backtest.registry().singles() {
            prop_assert!(!(candle.bullish && candle.bearish));
        }
    }

    #[test]
    fn classification_never_panics_and_admits_everything(rows in arb_rows()) {
        let backtest = run(&rows);
        prop_assert_eq!(backtest.registry().len(), rows.len());
    }

    #[test]
    fn extrema_marking_spares_window_boundaries(
        rows in arb_rows(),
        n in 1usize..12,
    ) {
        // classify without any periodic marking, then run one explicit pass:
        // the boundaries of the n+2 window must stay unflagged
        let mut backtest = Backtest::new(SimParams {
            warmup: usize::MAX,
            ..SimParams::default()
        });
        backtest.run(&rows);
        let mut registry = backtest.into_registry();
        ExtremaTracker::new(n).mark(&mut registry);

        let len = registry.len();
        let window_first = len.saturating_sub(n + 2);
        let last = len - 1;
        prop_assert!(!registry.singles()[window_first].minima);
        prop_assert!(!registry.singles()[window_first].maxima);
        prop_assert!(!registry.singles()[last].minima);
        prop_assert!(!registry.singles()[last].maxima);
    }
}
