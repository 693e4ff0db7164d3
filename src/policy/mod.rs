//! Policy module for flow resolution
//!
//! This module defines the Strategy pattern for the behavioural rules of the
//! model: how much the government spends, how much tax it collects and how
//! fast credit grows. The engine asks a [`PolicySet`] for these amounts every
//! period; the defaults reproduce the model's standard formulas and any of
//! them can be replaced when the simulation is built.
//!
//! Closures with the matching signature implement the policy traits, so an
//! override can be as small as `|step| if step < 12 { 100.0 } else { 150.0 }`.

use crate::config::ModelConfig;
use crate::core::history::Record;
use crate::core::PeriodFlows;
use crate::types::Sector;

pub mod defaults;

pub use defaults::{ConstantSpending, ProportionalGrowth, ProportionalTax};

/// Government spending per period
pub trait SpendingPolicy {
    fn spending(&self, step: usize) -> f64;
}

/// Taxes collected per period
///
/// `balances` is the pre-step snapshot. `flows` holds this period's already
/// resolved spending, credit and interest amounts (its `taxes` field is not
/// yet set). The engine clamps the result at zero.
pub trait TaxPolicy {
    fn taxes(&self, step: usize, balances: &Record, flows: &PeriodFlows) -> f64;
}

/// Change in a credit stock per period
///
/// Positive values create new loans, negative values are repayments.
pub trait CreditPolicy {
    fn change(&self, step: usize, balances: &Record) -> f64;
}

impl<F> SpendingPolicy for F
where
    F: Fn(usize) -> f64,
{
    fn spending(&self, step: usize) -> f64 {
        self(step)
    }
}

impl<F> TaxPolicy for F
where
    F: Fn(usize, &Record) -> f64,
{
    fn taxes(&self, step: usize, balances: &Record, _flows: &PeriodFlows) -> f64 {
        self(step, balances)
    }
}

impl<F> CreditPolicy for F
where
    F: Fn(usize, &Record) -> f64,
{
    fn change(&self, step: usize, balances: &Record) -> f64 {
        self(step, balances)
    }
}

/// The policies a simulation resolves its flows with
pub struct PolicySet {
    pub spending: Box<dyn SpendingPolicy>,
    pub tax: Box<dyn TaxPolicy>,
    pub loan_growth: Box<dyn CreditPolicy>,
    pub private_loan_growth: Box<dyn CreditPolicy>,
}

impl PolicySet {
    /// Default policies parameterised by `config`
    ///
    /// - spending: constant `gov_spending`
    /// - taxes: `tax_rate` times the period's tax base
    /// - bank loans: `loan_growth` times `Private:Loans`
    /// - private loans: `private_loan_growth` times `Private:PrivateLoansAsset`
    pub fn from_config(config: &ModelConfig) -> Self {
        PolicySet {
            spending: Box::new(ConstantSpending(config.gov_spending)),
            tax: Box::new(ProportionalTax {
                rate: config.tax_rate,
            }),
            loan_growth: Box::new(ProportionalGrowth::new(
                config.loan_growth,
                Sector::Private,
                "Loans",
            )),
            private_loan_growth: Box::new(ProportionalGrowth::new(
                config.private_loan_growth,
                Sector::Private,
                "PrivateLoansAsset",
            )),
        }
    }

    pub fn with_spending(mut self, policy: impl SpendingPolicy + 'static) -> Self {
        self.spending = Box::new(policy);
        self
    }

    pub fn with_tax(mut self, policy: impl TaxPolicy + 'static) -> Self {
        self.tax = Box::new(policy);
        self
    }

    pub fn with_loan_growth(mut self, policy: impl CreditPolicy + 'static) -> Self {
        self.loan_growth = Box::new(policy);
        self
    }

    pub fn with_private_loan_growth(mut self, policy: impl CreditPolicy + 'static) -> Self {
        self.private_loan_growth = Box::new(policy);
        self
    }
}
