//! Account-related types for the money system ledger
//!
//! This module defines sectors, account categories and the `Account`
//! balance that every posting ultimately mutates.

use crate::types::SimulationError;
use std::fmt;
use std::str::FromStr;

/// The four sectors of the closed economy
///
/// Each sector owns one independent balance sheet in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sector {
    /// Households and firms
    Private,
    /// Commercial banking system
    Banks,
    /// Treasury
    Government,
    /// Central bank
    CentralBank,
}

impl Sector {
    /// All sectors in chart order
    pub const ALL: [Sector; 4] = [
        Sector::Private,
        Sector::Banks,
        Sector::Government,
        Sector::CentralBank,
    ];

    /// Name used for ledger keys and snapshot columns
    pub fn as_str(self) -> &'static str {
        match self {
            Sector::Private => "Private",
            Sector::Banks => "Banks",
            Sector::Government => "Government",
            Sector::CentralBank => "CentralBank",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sector {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sector::ALL
            .into_iter()
            .find(|sector| sector.as_str() == s)
            .ok_or_else(|| SimulationError::unknown_sector(s))
    }
}

impl From<Sector> for String {
    fn from(sector: Sector) -> Self {
        sector.as_str().to_string()
    }
}

/// Balance sheet category of an account
///
/// The category carries the sign convention: postings always hold the literal
/// delta, and the category decides how that delta counts towards balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountCategory {
    Asset,
    Liability,
    Equity,
}

impl AccountCategory {
    /// Contribution of this category to the balance sheet sum
    ///
    /// Assets count `+1`, liabilities and equity count `-1`.
    pub fn sign(self) -> f64 {
        match self {
            AccountCategory::Asset => 1.0,
            AccountCategory::Liability | AccountCategory::Equity => -1.0,
        }
    }
}

/// A single named balance inside a sector
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Account name, unique within its sector
    pub name: String,

    /// Asset, liability or equity
    pub category: AccountCategory,

    /// Current balance
    ///
    /// Only changed through additive deltas, except equity accounts whose
    /// balance is reassigned by the equity recompute.
    pub balance: f64,
}

impl Account {
    /// Create an account with a starting balance
    pub fn new(name: impl Into<String>, category: AccountCategory, balance: f64) -> Self {
        Account {
            name: name.into(),
            category,
            balance,
        }
    }

    /// Add a signed delta to the balance
    pub fn apply(&mut self, delta: f64) {
        self.balance += delta;
    }

    /// Balance weighted by the category sign
    pub fn signed_balance(&self) -> f64 {
        self.balance * self.category.sign()
    }
}
