//! Annotation text for the visualization collaborator.
//!
//! Builds the `<br>`-separated hover string shown on each candle of the
//! rendered chart: timestamp and OHLC always, then signal, pattern and extrema
//! lines only when they carry information. Chart construction itself lives
//! with the collaborator; this module only formats.

use crate::candle::{ExtremaMark, OhlcRow, Signal, NO_PATTERN};
use crate::registry::PatternRegistry;

/// Assemble one hover string from already-resolved annotation values.
pub fn hover_text(
    ts: &str,
    open: f64,
    close: f64,
    high: f64,
    low: f64,
    signal: Signal,
    single_pattern: &str,
    dual_pattern: &str,
    extrema: ExtremaMark,
) -> String {
    let mut text = format!("{ts}<br>Open: {open}<br>Close: {close}<br>High: {high}<br>Low: {low}");
    text.push_str("<br>Signal: ");
    text.push_str(&signal.to_string());
    if single_pattern != NO_PATTERN {
        text.push_str("<br>Single Pattern: ");
        text.push_str(single_pattern);
    }
    if dual_pattern != NO_PATTERN {
        text.push_str("<br>Dual Pattern: ");
        text.push_str(dual_pattern);
    }
    if extrema != ExtremaMark::None {
        text.push_str("<br>Extrema: ");
        text.push_str(&extrema.to_string());
    }
    text
}

/// Hover string for one row, resolved through the registry's query interface.
pub fn annotation_for<R: OhlcRow>(registry: &PatternRegistry, row: &R) -> String {
    let ts = row.timestamp();
    let (single_pattern, dual_pattern) = registry.labels_for(ts);
    hover_text(
        &ts.to_string(),
        row.open(),
        row.close(),
        row.high(),
        row.low(),
        registry.signal_for(ts),
        single_pattern,
        dual_pattern,
        registry.extrema_for(ts),
    )
}

/// One hover string per row, in row order.
pub fn annotations<R: OhlcRow>(registry: &PatternRegistry, rows: &[R]) -> Vec<String> {
    rows.iter().map(|row| annotation_for(registry, row)).collect()
}

// ============================================================
// TESTS
// ============================================================
