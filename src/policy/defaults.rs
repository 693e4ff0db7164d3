//! Default policies
//!
//! The standard behavioural rules of the model. [`PolicySet::from_config`]
//! wires them up from the numeric parameters of a
//! [`ModelConfig`](crate::config::ModelConfig).
//!
//! [`PolicySet::from_config`]: super::PolicySet::from_config

use super::{CreditPolicy, SpendingPolicy, TaxPolicy};
use crate::core::history::{balance_of, Record};
use crate::core::PeriodFlows;
use crate::types::Sector;

/// The same spending level every period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSpending(pub f64);

impl SpendingPolicy for ConstantSpending {
    fn spending(&self, _step: usize) -> f64 {
        self.0
    }
}

/// A flat rate on the period's tax base
///
/// The base is `gov_spending + interest_on_deposits + interest_on_bonds -
/// interest_on_loans`, taken from the flows already resolved this period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProportionalTax {
    pub rate: f64,
}

impl TaxPolicy for ProportionalTax {
    fn taxes(&self, _step: usize, _balances: &Record, flows: &PeriodFlows) -> f64 {
        (self.rate * flows.tax_base()).max(0.0)
    }
}

/// Grow a stock by a fixed share of its pre-step balance
#[derive(Debug, Clone, PartialEq)]
pub struct ProportionalGrowth {
    pub rate: f64,
    pub sector: Sector,
    pub account: String,
}

impl ProportionalGrowth {
    pub fn new(rate: f64, sector: Sector, account: impl Into<String>) -> Self {
        ProportionalGrowth {
            rate,
            sector,
            account: account.into(),
        }
    }
}

impl CreditPolicy for ProportionalGrowth {
    fn change(&self, _step: usize, balances: &Record) -> f64 {
        self.rate * balance_of(balances, self.sector.as_str(), &self.account)
    }
}
