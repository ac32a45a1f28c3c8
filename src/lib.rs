//! # candlesim - Candlestick Pattern Classification for Backtests
//!
//! Classifies a chronological sequence of OHLC candles into named
//! technical-analysis patterns (single-, dual- and triple-candle formations)
//! plus local extrema and trend slopes, for use in a backtest simulation and
//! its visualization.
//!
//! ## Quick Start
//!
//! ```rust
//! use candlesim::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! // Pre-sorted OHLC rows from the data-source collaborator
//! let rows: Vec<Row> = (0..3i64)
//!     .map(|i| Row {
//!         ts: Utc.timestamp_opt(i * 3600, 0).unwrap(),
//!         open: 10.0,
//!         high: 12.0,
//!         low: 10.0,
//!         close: 12.0,
//!         volume: 0.0,
//!     })
//!     .collect();
//!
//! let mut backtest = Backtest::new(SimParams::default());
//! backtest.run(&rows);
//!
//! let registry = backtest.registry();
//! let (single, _dual) = registry.labels_for(rows[0].timestamp());
//! assert_eq!(single, "White Marabozu");
//! assert_eq!(registry.signal_for(rows[0].timestamp()), Signal::Bullish);
//! ```
//!
//! The classification engine is strictly sequential within a run; use
//! [`simulate_parallel`] to fan independent instruments out across threads,
//! each with its own isolated registry.

pub mod candle;
pub mod classify;
pub mod config;
pub mod extrema;
pub mod geometry;
pub mod hover;
pub mod logging;
pub mod registry;
pub mod sim;
pub mod source;
pub mod trend;
pub mod wallet;

pub mod prelude {
    pub use crate::{
        // Candle model
        candle::{Candle, ExtremaMark, OhlcRow, PatternId, Signal, NO_PATTERN},
        // Classifiers
        classify::{DualClassifier, SingleClassifier, TripleClassifier},
        // Configuration
        config::{BacktestConfig, ConfigError},
        // Extrema
        extrema::ExtremaTracker,
        // Annotations
        hover::{annotation_for, annotations, hover_text},
        // Logging
        logging::{archive_logs, init_logging, LogConfig, LogFormat},
        // Registry
        registry::{PatternHit, PatternRegistry},
        // Driver
        sim::{simulate_parallel, Backtest, InstrumentResult, SimParams},
        // Data sources
        source::{CandleSource, MemorySource, Row, SourceError},
        // Trendlines
        trend::{TrendDetector, TrendDirection, Trendline},
        // Wallet stub
        wallet::{Wallet, WalletError},
    };
}

pub use candle::{Candle, ExtremaMark, OhlcRow, PatternId, Signal};
pub use registry::PatternRegistry;
pub use sim::{simulate_parallel, Backtest, SimParams};
