//! Core accounting and simulation module
//!
//! This module contains the stock-flow consistent engine:
//! - `sector` - One sector's balance sheet
//! - `ledger` - Double-entry ledger over all sectors with a transaction log
//! - `chart` - Default chart of accounts and ledger construction
//! - `catalogue` - Balanced transactions for every economic flow
//! - `history` - Per-step stock, flow and metric records
//! - `metrics` - Derived aggregates
//! - `engine` - Period stepping algorithm

pub mod catalogue;
pub mod chart;
pub mod engine;
pub mod history;
pub mod ledger;
pub mod metrics;
pub mod sector;

pub use catalogue::{select_transactions, FlowKind};
pub use chart::build_ledger;
pub use engine::{PeriodFlows, Simulation};
pub use history::{balance_of, History, Record, StepRecord};
pub use ledger::{Checkpoint, Ledger};
pub use metrics::compute_metrics;
pub use sector::SectorLedger;
