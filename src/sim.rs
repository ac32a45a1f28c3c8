//! The simulation driver.
//!
//! Feeds rows through the classification stages one at a time, in timestamp
//! order. Each stage completes, and its registry writes commit, before the
//! next stage or the next row runs, because later stages read state written by
//! earlier ones. The whole pass is a finite offline batch; downstream readers
//! query the registry only after it completes.

use rayon::prelude::*;

use crate::candle::{Candle, OhlcRow};
use crate::classify::{DualClassifier, SingleClassifier, TripleClassifier};
use crate::extrema::ExtremaTracker;
use crate::registry::PatternRegistry;
use crate::trend::TrendDetector;

/// Driver-supplied constants for one simulation run.
#[derive(Debug, Clone, Copy)]
pub struct SimParams {
    /// Trailing window scanned for extrema candidates.
    pub extrema_window: usize,
    /// Extrema marking runs on every `extrema_cadence`-th row.
    pub extrema_cadence: usize,
    /// Rows to see before the first extrema pass (marking starts once the row
    /// index exceeds this).
    pub warmup: usize,
    /// Required absolute slope (scaled by 100) for a trendline.
    pub slope_threshold: f64,
    /// Trailing candles considered when anchoring trendlines.
    pub trend_lookback: usize,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            extrema_window: 10,
            extrema_cadence: 10,
            warmup: 5,
            slope_threshold: 30.0,
            trend_lookback: 10,
        }
    }
}

/// One backtest pass over a single instrument.
///
/// Owns the registry and the classification components; classifiers receive
/// the registry by reference per call, so each `Backtest` is fully isolated
/// and independently testable.
pub struct Backtest {
    params: SimParams,
    registry: PatternRegistry,
    single: SingleClassifier,
    dual: DualClassifier,
    triple: TripleClassifier,
    extrema: ExtremaTracker,
    trend: TrendDetector,
}

impl Backtest {
    pub fn new(params: SimParams) -> Self {
        Self {
            params,
            registry: PatternRegistry::new(),
            single: SingleClassifier::new(),
            dual: DualClassifier::new(),
            triple: TripleClassifier::new(),
            extrema: ExtremaTracker::new(params.extrema_window),
            trend: TrendDetector::new(params.slope_threshold),
        }
    }

    /// Process `rows` strictly sequentially. Rows must be pre-sorted ascending
    /// by timestamp; the driver does not sort or re-validate.
    pub fn run<R: OhlcRow>(&mut self, rows: &[R]) {
        if rows.is_empty() {
            tracing::info!("no rows to simulate");
            return;
        }
        let span = tracing::info_span!("backtest", rows = rows.len());
        let _guard = span.enter();
        tracing::info!(
            start = %rows[0].timestamp(),
            end = %rows[rows.len() - 1].timestamp(),
            "running simulation"
        );

        for (index, row) in rows.iter().enumerate() {
            let candle = Candle::from_row(row);

            // Periodic extrema pass; trendlines anchor on the freshly flagged
            // extrema, so they run in the same tick.
            if index > self.params.warmup && index % self.params.extrema_cadence == 0 {
                self.extrema.mark(&mut self.registry);
                self.trend
                    .detect(&mut self.registry, self.params.trend_lookback);
            }

            self.single.classify(&mut self.registry, candle);

            if index != 0 {
                self.dual.classify(&mut self.registry);
            }

            if index > 2 {
                self.triple.classify(&mut self.registry);
            }
        }

        tracing::info!(
            candles = self.registry.len(),
            duals = self.registry.duals().len(),
            triples = self.registry.triples().len(),
            trendlines = self.registry.trendlines().len(),
            "simulation finished"
        );
    }

    /// The classification results of this run.
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Consume the driver, keeping only the results.
    pub fn into_registry(self) -> PatternRegistry {
        self.registry
    }
}

// ============================================================
// PARALLEL RUNS
// ============================================================

/// Results of one instrument's run.
#[derive(Debug)]
pub struct InstrumentResult {
    pub pair: String,
    pub registry: PatternRegistry,
}

/// Run independent instruments in parallel, one isolated registry per pair.
/// Each instrument's rows are still processed strictly sequentially.
pub fn simulate_parallel<'a, R, I>(params: SimParams, instruments: I) -> Vec<InstrumentResult>
where
    R: OhlcRow + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [R])>,
{
    instruments
        .into_par_iter()
        .map(|(pair, rows)| {
            let mut backtest = Backtest::new(params);
            backtest.run(rows);
            InstrumentResult {
                pair: pair.to_string(),
                registry: backtest.into_registry(),
            }
        })
        .collect()
}

// ============================================================
// TESTS
// ============================================================
