//! The data-source collaborator interface.
//!
//! Database connectors implement [`CandleSource`] to hand the driver a
//! pre-sorted row range for one pair. Actual connectivity is out of scope
//! here; [`MemorySource`] is the in-memory implementation used by the
//! simulation tests and examples.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::candle::OhlcRow;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unknown pair: {0}")]
    UnknownPair(String),

    #[error("source backend error: {0}")]
    Backend(String),
}

/// One raw OHLC row as delivered by a source. Extra fields beyond timestamp
/// and OHLC are carried for the visualization but ignored by the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub ts: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl OhlcRow for Row {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.ts
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}

/// Supplies pre-sorted rows for a pair over an inclusive date range.
pub trait CandleSource {
    fn fetch(&self, start: NaiveDate, end: NaiveDate, pair: &str) -> Result<Vec<Row>, SourceError>;
}

/// In-memory source over pre-sorted per-pair row sets.
#[derive(Debug, Default)]
pub struct MemorySource {
    pairs: HashMap<String, Vec<Row>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register rows for a pair. Rows must already be sorted ascending by
    /// timestamp.
    pub fn insert(&mut self, pair: impl Into<String>, rows: Vec<Row>) {
        self.pairs.insert(pair.into(), rows);
    }
}

impl CandleSource for MemorySource {
    fn fetch(&self, start: NaiveDate, end: NaiveDate, pair: &str) -> Result<Vec<Row>, SourceError> {
        let rows = self
            .pairs
            .get(pair)
            .ok_or_else(|| SourceError::UnknownPair(pair.to_string()))?;
        Ok(rows
            .iter()
            .filter(|row| {
                let date = row.ts.date_naive();
                start <= date && date <= end
            })
            .copied()
            .collect())
    }
}

// ============================================================
// TESTS
// ============================================================
