//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: sectors, account categories and balances
//! - `transaction`: postings and transactions
//! - `error`: error types for the simulation

pub mod account;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountCategory, Sector};
pub use error::SimulationError;
pub use transaction::{Posting, Transaction, DEFAULT_TOLERANCE};
