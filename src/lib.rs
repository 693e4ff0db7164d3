//! SFC Money Engine Library
//! # Overview
//!
//! This library simulates a closed monetary economy of four sectors (Private,
//! Banks, Government, Central Bank) with stock-flow consistent double-entry
//! accounting: every flow is a balanced set of postings and every sector
//! balance sheet satisfies `assets - liabilities - equity = 0` after each step.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, Posting, Transaction, errors)
//! - [`config`] - Model parameters and initial balances
//! - [`policy`] - Spending, tax and credit rules (strategy pattern)
//! - [`core`] - Accounting and simulation:
//!   - [`core::ledger`] - Double-entry ledger with validate-then-apply
//!   - [`core::catalogue`] - Balanced transactions for every economic flow
//!   - [`core::engine`] - Period stepping algorithm
//! - [`io`] - JSON config loading and CSV export
//! - [`cli`] - CLI arguments parsing
//!
//! # Example
//!
//! ```
//! use sfc_money_engine::{ModelConfig, Simulation};
//!
//! let config = ModelConfig { steps: 12, ..ModelConfig::default() };
//! let mut simulation = Simulation::new(config).unwrap();
//! let history = simulation.run().unwrap();
//!
//! assert_eq!(history.len(), 12);
//! let check = history.metrics[11]["Sector_Balance_Check"];
//! assert!(check.abs() < 1e-6);
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod core;
pub mod io;
pub mod policy;
pub mod types;

pub use config::{InitialBalances, ModelConfig};
pub use core::{History, Ledger, PeriodFlows, Record, SectorLedger, Simulation, StepRecord};
pub use policy::{CreditPolicy, PolicySet, SpendingPolicy, TaxPolicy};
pub use types::{Account, AccountCategory, Posting, Sector, SimulationError, Transaction};
