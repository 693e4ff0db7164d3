//! Error types for the money system simulation
//!
//! Every failure the engine can report is a variant of [`SimulationError`].
//!
//! # Error Categories
//!
//! - **Accounting Errors**: unknown accounts, unbalanced transactions and
//!   balance sheet invariant violations. These indicate a defect in the
//!   transaction catalogue or the configuration and are never retried.
//! - **Configuration Errors**: unknown sector names, initial balances outside
//!   the chart, duplicate chart entries, invalid parameters.
//! - **I/O Errors**: reading config files and writing CSV output.

use thiserror::Error;

/// Main error type for the simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A posting references a sector or account that is not in the ledger
    ///
    /// The transaction is rejected before any account is touched.
    #[error("Unknown account '{account}' in sector '{sector}'")]
    UnknownAccount {
        /// Sector named by the posting
        sector: String,
        /// Account named by the posting
        account: String,
    },

    /// The signed sum of a transaction's postings exceeds the tolerance
    ///
    /// The transaction is rejected in full.
    #[error("Transaction '{name}' unbalanced by {imbalance:.6}")]
    UnbalancedTransaction {
        /// Transaction name
        name: String,
        /// Signed posting sum under the category sign convention
        imbalance: f64,
    },

    /// A sector fails `assets - liabilities - equity = 0` after equity recompute
    ///
    /// Fatal: the catalogue or configuration is internally inconsistent.
    #[error("Sector '{sector}' unbalanced: A={assets:.6} L={liabilities:.6} E={equity:.6}")]
    BalanceSheetInvariant {
        /// Sector name
        sector: String,
        /// Total assets
        assets: f64,
        /// Total liabilities
        liabilities: f64,
        /// Total equity
        equity: f64,
    },

    /// A sector name outside Private, Banks, Government and CentralBank
    #[error("Unknown sector '{name}'")]
    UnknownSector {
        /// Name that failed to parse
        name: String,
    },

    /// Initial balances name a sector or account outside the chart of accounts
    #[error("Initial balance for unknown account '{account}' in sector '{sector}'")]
    UnknownInitialBalance {
        /// Configured sector name
        sector: String,
        /// Configured account name
        account: String,
    },

    /// The same account name appears twice in one sector
    #[error("Duplicate account '{account}' in sector '{sector}'")]
    DuplicateAccount {
        /// Sector name
        sector: String,
        /// Repeated account name
        account: String,
    },

    /// A configuration value is unusable
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },

    /// I/O error while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV serialization error
    #[error("CSV error: {message}")]
    Csv {
        /// Description of the CSV error
        message: String,
    },
}

impl From<std::io::Error> for SimulationError {
    fn from(error: std::io::Error) -> Self {
        SimulationError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for SimulationError {
    fn from(error: csv::Error) -> Self {
        SimulationError::Csv {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(error: serde_json::Error) -> Self {
        SimulationError::InvalidConfig {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl SimulationError {
    /// Create an UnknownAccount error
    pub fn unknown_account(sector: &str, account: &str) -> Self {
        SimulationError::UnknownAccount {
            sector: sector.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an UnbalancedTransaction error
    pub fn unbalanced_transaction(name: &str, imbalance: f64) -> Self {
        SimulationError::UnbalancedTransaction {
            name: name.to_string(),
            imbalance,
        }
    }

    /// Create a BalanceSheetInvariant error
    pub fn balance_sheet_invariant(
        sector: &str,
        assets: f64,
        liabilities: f64,
        equity: f64,
    ) -> Self {
        SimulationError::BalanceSheetInvariant {
            sector: sector.to_string(),
            assets,
            liabilities,
            equity,
        }
    }

    /// Create an UnknownSector error
    pub fn unknown_sector(name: &str) -> Self {
        SimulationError::UnknownSector {
            name: name.to_string(),
        }
    }

    /// Create an UnknownInitialBalance error
    pub fn unknown_initial_balance(sector: &str, account: &str) -> Self {
        SimulationError::UnknownInitialBalance {
            sector: sector.to_string(),
            account: account.to_string(),
        }
    }

    /// Create a DuplicateAccount error
    pub fn duplicate_account(sector: &str, account: &str) -> Self {
        SimulationError::DuplicateAccount {
            sector: sector.to_string(),
            account: account.to_string(),
        }
    }

    /// Create an InvalidConfig error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        SimulationError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this error signals a broken accounting invariant
    pub fn is_accounting_defect(&self) -> bool {
        matches!(
            self,
            SimulationError::UnknownAccount { .. }
                | SimulationError::UnbalancedTransaction { .. }
                | SimulationError::BalanceSheetInvariant { .. }
        )
    }
}
