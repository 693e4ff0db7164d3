//! Simulation configuration
//!
//! `ModelConfig` carries the numeric policy and behavioural parameters of a
//! run. All rates are per period (monthly by default). Behavioural overrides
//! are not configuration data; they are supplied as a
//! [`PolicySet`](crate::policy::PolicySet).

use crate::types::{SimulationError, DEFAULT_TOLERANCE};
use serde::Deserialize;
use std::collections::BTreeMap;

type BalanceMap = BTreeMap<String, BTreeMap<String, f64>>;

/// Starting balances by sector and account
///
/// Keys are validated against the chart of accounts when the ledger is built:
/// unknown names are rejected, chart accounts not listed start at zero.
///
/// When deserialized, an empty mapping stands for "not given" and yields the
/// default chart balances. Use [`InitialBalances::empty`] for an all-zero start.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "BalanceMap")]
pub struct InitialBalances(BalanceMap);

impl From<BalanceMap> for InitialBalances {
    fn from(balances: BalanceMap) -> Self {
        if balances.is_empty() {
            InitialBalances::default()
        } else {
            InitialBalances(balances)
        }
    }
}

impl InitialBalances {
    /// No starting balances: every chart account starts at zero
    pub fn empty() -> Self {
        InitialBalances(BTreeMap::new())
    }

    /// Set one starting balance
    pub fn set(&mut self, sector: &str, account: &str, balance: f64) -> &mut Self {
        self.0
            .entry(sector.to_string())
            .or_default()
            .insert(account.to_string(), balance);
        self
    }

    pub fn get(&self, sector: &str, account: &str) -> Option<f64> {
        self.0
            .get(sector)
            .and_then(|accounts| accounts.get(account))
            .copied()
    }

    /// Iterate over `(sector, account, balance)` entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.0.iter().flat_map(|(sector, accounts)| {
            accounts
                .iter()
                .map(move |(account, balance)| (sector.as_str(), account.as_str(), *balance))
        })
    }
}

impl Default for InitialBalances {
    /// Balances of the default chart
    ///
    /// Private deposits mirror bank deposits, private loans mirror bank loans,
    /// and outstanding government bonds are held by the private sector and the
    /// central bank.
    fn default() -> Self {
        let mut initial = InitialBalances::empty();
        initial
            .set("Private", "Deposits", 1200.0)
            .set("Private", "Loans", 800.0)
            .set("Private", "GovBonds", 500.0)
            .set("Banks", "Loans", 800.0)
            .set("Banks", "Reserves", 400.0)
            .set("Banks", "Deposits", 1200.0)
            .set("Government", "GovBonds", 900.0)
            .set("CentralBank", "Reserves", 400.0)
            .set("CentralBank", "GovBonds", 400.0);
        initial
    }
}

/// Numeric parameters of a simulation run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Number of periods driven by `run`
    pub steps: usize,

    /// Government spending per period
    pub gov_spending: f64,
    /// Share of the tax base collected as taxes
    pub tax_rate: f64,
    /// Growth of bank loans per period, as a share of outstanding loans
    pub loan_growth: f64,
    /// Growth of private-to-private loans per period
    pub private_loan_growth: f64,

    pub deposit_rate: f64,
    pub loan_rate: f64,
    pub reserve_rate: f64,
    pub bond_rate: f64,

    /// Treasury General Account balance restored by bond issuance every period
    pub tga_target: f64,

    /// Tolerance for transaction and balance sheet checks
    pub tolerance: f64,

    pub initial: InitialBalances,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            steps: 120,
            gov_spending: 100.0,
            tax_rate: 0.2,
            loan_growth: 0.01,
            private_loan_growth: 0.0,
            deposit_rate: 0.01 / 12.0,
            loan_rate: 0.04 / 12.0,
            reserve_rate: 0.02 / 12.0,
            bond_rate: 0.03 / 12.0,
            tga_target: 0.0,
            tolerance: DEFAULT_TOLERANCE,
            initial: InitialBalances::default(),
        }
    }
}

impl ModelConfig {
    /// Reject parameters the engine cannot work with
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any parameter or initial balance is not
    /// finite, or if the tolerance is not strictly positive.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let params = [
            ("gov_spending", self.gov_spending),
            ("tax_rate", self.tax_rate),
            ("loan_growth", self.loan_growth),
            ("private_loan_growth", self.private_loan_growth),
            ("deposit_rate", self.deposit_rate),
            ("loan_rate", self.loan_rate),
            ("reserve_rate", self.reserve_rate),
            ("bond_rate", self.bond_rate),
            ("tga_target", self.tga_target),
        ];
        if let Some((name, value)) = params.iter().find(|(_, value)| !value.is_finite()) {
            return Err(SimulationError::invalid_config(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(SimulationError::invalid_config(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }

        let mut balances = self.initial.iter();
        if let Some((sector, account, balance)) = balances.find(|(_, _, b)| !b.is_finite()) {
            return Err(SimulationError::invalid_config(format!(
                "initial balance {}:{} must be finite, got {}",
                sector, account, balance
            )));
        }

        Ok(())
    }
}
