//! Candle value type and the row input interface.
//!
//! A [`Candle`] is one OHLC sample plus the state derived during classification:
//! the bullish/bearish coloring, the local-extrema flags, and one pattern label
//! per arity. Rows arrive from the data-source collaborator through the
//! [`OhlcRow`] trait; any fields beyond timestamp + OHLC (buy, sell, volume) are
//! ignored by the classification core.

use chrono::{DateTime, Utc};

// ============================================================
// ROW INPUT TRAIT
// ============================================================

/// Input interface for one OHLC row.
///
/// Rows must be pre-sorted ascending by timestamp; the core never sorts.
pub trait OhlcRow {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
    fn timestamp(&self) -> DateTime<Utc>;

    /// Ignored by the classification core.
    fn volume(&self) -> f64 {
        0.0
    }
}

/// Blanket impl for references to dyn OhlcRow
impl OhlcRow for &dyn OhlcRow {
    fn open(&self) -> f64 {
        (*self).open()
    }

    fn high(&self) -> f64 {
        (*self).high()
    }

    fn low(&self) -> f64 {
        (*self).low()
    }

    fn close(&self) -> f64 {
        (*self).close()
    }

    fn timestamp(&self) -> DateTime<Utc> {
        (*self).timestamp()
    }

    fn volume(&self) -> f64 {
        (*self).volume()
    }
}

// ============================================================
// PATTERN IDENTIFIERS
// ============================================================

/// Unique identifier for a pattern type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternId(pub &'static str);

impl PatternId {
    /// Returns the string identifier
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Sentinel label returned by queries for candles without a pattern at the
/// requested arity, and for timestamps absent from the registry.
pub const NO_PATTERN: &str = "None";

// ============================================================
// CANDLE
// ============================================================

/// One classified OHLC sample.
///
/// The derived fields follow a write-once-per-arity discipline enforced by the
/// registry's append path, not by the fields themselves: the coloring flags are
/// set when the candle is admitted, each pattern label is set by the first
/// qualifying rule of its arity, and the extrema flags are set only by the
/// extrema tracker (necessarily after admission).
#[derive(Debug, Clone, serde::Serialize)]
pub struct Candle {
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub ts: DateTime<Utc>,
    /// True when `open < close`. Never true together with `bearish`.
    pub bullish: bool,
    /// True when `open > close`.
    pub bearish: bool,
    pub minima: bool,
    pub maxima: bool,
    #[serde(serialize_with = "serialize_label")]
    pub single_pattern: Option<PatternId>,
    #[serde(serialize_with = "serialize_label")]
    pub dual_pattern: Option<PatternId>,
    #[serde(serialize_with = "serialize_label")]
    pub triple_pattern: Option<PatternId>,
}

fn serialize_label<S: serde::Serializer>(
    label: &Option<PatternId>,
    s: S,
) -> Result<S::Ok, S::Error> {
    s.serialize_str(label.map_or(NO_PATTERN, |id| id.as_str()))
}

impl Candle {
    /// Construct an unclassified candle from a raw row.
    pub fn from_row<R: OhlcRow>(row: &R) -> Self {
        Self {
            open: row.open(),
            close: row.close(),
            high: row.high(),
            low: row.low(),
            ts: row.timestamp(),
            bullish: false,
            bearish: false,
            minima: false,
            maxima: false,
            single_pattern: None,
            dual_pattern: None,
            triple_pattern: None,
        }
    }

    /// Directional signal derived from the coloring flags.
    #[inline]
    pub fn signal(&self) -> Signal {
        if self.bullish {
            Signal::Bullish
        } else if self.bearish {
            Signal::Bearish
        } else {
            Signal::Neutral
        }
    }

    /// Extrema marking derived from the minima/maxima flags.
    #[inline]
    pub fn extrema_mark(&self) -> ExtremaMark {
        match (self.minima, self.maxima) {
            (true, true) => ExtremaMark::Both,
            (true, false) => ExtremaMark::Minima,
            (false, true) => ExtremaMark::Maxima,
            (false, false) => ExtremaMark::None,
        }
    }
}

// ============================================================
// QUERY SENTINEL ENUMS
// ============================================================

/// Directional signal of a candle, as rendered in annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Signal {
    Bullish,
    Bearish,
    Neutral,
    /// Timestamp absent from the registry.
    Undetermined,
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Signal::Bullish => "Bullish",
            Signal::Bearish => "Bearish",
            Signal::Neutral => "Neutral",
            Signal::Undetermined => "Could not be determined",
        })
    }
}

/// Local-extrema marking of a candle, as rendered in annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ExtremaMark {
    None,
    Minima,
    Maxima,
    /// Only reachable on degenerate data where one candle is both the lowest
    /// low and the highest high of its window.
    Both,
}

impl std::fmt::Display for ExtremaMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ExtremaMark::None => "",
            ExtremaMark::Minima => "Local minima",
            ExtremaMark::Maxima => "Local maxima",
            ExtremaMark::Both => "Both local minima and maxima",
        })
    }
}

// ============================================================
// TESTS
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Row {
        o: f64,
        h: f64,
        l: f64,
        c: f64,
        ts: DateTime<Utc>,
    }

    impl OhlcRow for Row {
        fn open(&self) -> f64 {
            self.o
        }

        fn high(&self) -> f64 {
            self.h
        }

        fn low(&self) -> f64 {
            self.l
        }

        fn close(&self) -> f64 {
            self.c
        }

        fn timestamp(&self) -> DateTime<Utc> {
            self.ts
        }
    }

    #[test]
    fn from_row_starts_unclassified() {
        let row = Row {
            o: 1.0,
            h: 2.0,
            l: 0.5,
            c: 1.5,
            ts: Utc.timestamp_opt(0, 0).unwrap(),
        };
        let candle = Candle::from_row(&row);
        assert!(!candle.bullish && !candle.bearish);
        assert!(!candle.minima && !candle.maxima);
        assert!(candle.single_pattern.is_none());
        assert_eq!(candle.signal(), Signal::Neutral);
        assert_eq!(candle.extrema_mark(), ExtremaMark::None);
    }

    #[test]
    fn labels_serialize_as_sentinels() {
        let row = Row {
            o: 1.0,
            h: 2.0,
            l: 0.5,
            c: 1.5,
            ts: Utc.timestamp_opt(0, 0).unwrap(),
        };
        let mut candle = Candle::from_row(&row);
        candle.single_pattern = Some(PatternId("Hammer"));
        let json = serde_json::to_value(&candle).unwrap();
        assert_eq!(json["single_pattern"], "Hammer");
        assert_eq!(json["dual_pattern"], "None");
        assert_eq!(json["triple_pattern"], "None");
    }

    #[test]
    fn sentinel_rendering() {
        assert_eq!(Signal::Undetermined.to_string(), "Could not be determined");
        assert_eq!(ExtremaMark::None.to_string(), "");
        assert_eq!(
            ExtremaMark::Both.to_string(),
            "Both local minima and maxima"
        );
    }
}
