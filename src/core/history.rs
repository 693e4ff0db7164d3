//! Per-step records accumulated over a simulation run

use indexmap::IndexMap;

/// Named values for one step, in insertion order
///
/// Used for stock snapshots (`"sector:account"` keys), flows and metrics.
pub type Record = IndexMap<String, f64>;

/// Look up `"sector:account"` in a stock record, defaulting to zero
pub fn balance_of(record: &Record, sector: &str, account: &str) -> f64 {
    record
        .get(&format!("{}:{}", sector, account))
        .copied()
        .unwrap_or(0.0)
}

/// Output of one completed step
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    /// Post-step balances
    pub stocks: Record,
    /// Flow amounts resolved and applied during the step
    pub flows: Record,
    /// Derived aggregates
    pub metrics: Record,
}

/// Stocks, flows and metrics of every completed step
///
/// The three sequences always have the same length; index `i` holds the
/// records of the `i`-th completed step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub stocks: Vec<Record>,
    pub flows: Vec<Record>,
    pub metrics: Vec<Record>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: StepRecord) {
        self.stocks.push(record.stocks);
        self.flows.push(record.flows);
        self.metrics.push(record.metrics);
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Records of the most recent step
    pub fn last(&self) -> Option<StepRecord> {
        Some(StepRecord {
            stocks: self.stocks.last()?.clone(),
            flows: self.flows.last()?.clone(),
            metrics: self.metrics.last()?.clone(),
        })
    }

    /// Values of one column across all steps, `None` where a step lacks it
    pub fn series<'a>(
        records: &'a [Record],
        key: &'a str,
    ) -> impl Iterator<Item = Option<f64>> + 'a {
        records.iter().map(move |record| record.get(key).copied())
    }
}
