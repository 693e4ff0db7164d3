//! Sector balance sheets
//!
//! This module provides the `SectorLedger` struct which holds the accounts of
//! one sector and computes its balance sheet totals.
//!
//! The SectorLedger is responsible for:
//! - Keeping account names unique within the sector
//! - Applying single-account deltas
//! - Computing asset, liability and equity totals
//! - Reassigning equity so the balance sheet identity holds

use crate::types::{Account, AccountCategory, SimulationError};
use indexmap::IndexMap;

/// One sector's balance sheet
///
/// Accounts keep their insertion order, which is the order they appear in
/// snapshots and CSV output.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorLedger {
    name: String,
    accounts: IndexMap<String, Account>,
}

impl SectorLedger {
    /// Create a sector with no accounts
    pub fn new(name: impl Into<String>) -> Self {
        SectorLedger {
            name: name.into(),
            accounts: IndexMap::new(),
        }
    }

    /// Add an account to the sector
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccount` if an account with the same name exists.
    pub fn add_account(&mut self, account: Account) -> Result<(), SimulationError> {
        if self.accounts.contains_key(&account.name) {
            let name = &account.name;
            return Err(SimulationError::duplicate_account(&self.name, name));
        }
        self.accounts.insert(account.name.clone(), account);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    /// Iterate over accounts in insertion order
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Add a delta to one account
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` if the account is not in this sector.
    pub fn apply(&mut self, account: &str, delta: f64) -> Result<(), SimulationError> {
        let sector = &self.name;
        self.accounts
            .get_mut(account)
            .ok_or_else(|| SimulationError::unknown_account(sector, account))?
            .apply(delta);
        Ok(())
    }

    fn total(&self, category: AccountCategory) -> f64 {
        self.accounts
            .values()
            .filter(|account| account.category == category)
            .map(|account| account.balance)
            .sum()
    }

    pub fn assets_total(&self) -> f64 {
        self.total(AccountCategory::Asset)
    }

    pub fn liabilities_total(&self) -> f64 {
        self.total(AccountCategory::Liability)
    }

    pub fn equity_total(&self) -> f64 {
        self.total(AccountCategory::Equity)
    }

    /// Assets minus liabilities
    pub fn net_position(&self) -> f64 {
        self.assets_total() - self.liabilities_total()
    }

    /// Reassign equity so that `assets - liabilities - equity = 0`
    ///
    /// The residual is split evenly across all equity accounts, ignoring their
    /// previous relative sizes. Sectors without equity accounts are left alone.
    ///
    /// # Returns
    ///
    /// `Some(delta)` with the change in total equity, or `None` when the sector
    /// has no equity accounts.
    pub fn recompute_equity(&mut self) -> Option<f64> {
        let equity_count = self
            .accounts
            .values()
            .filter(|account| account.category == AccountCategory::Equity)
            .count();
        if equity_count == 0 {
            return None;
        }

        let before = self.equity_total();
        let split = self.net_position() / equity_count as f64;
        for account in self.accounts.values_mut() {
            if account.category == AccountCategory::Equity {
                account.balance = split;
            }
        }
        Some(self.equity_total() - before)
    }

    /// Check the balance sheet identity within `tolerance`
    ///
    /// # Errors
    ///
    /// Returns `BalanceSheetInvariant` if the identity does not hold, including
    /// when any total is not finite.
    pub fn assert_balanced(&self, tolerance: f64) -> Result<(), SimulationError> {
        let assets = self.assets_total();
        let liabilities = self.liabilities_total();
        let equity = self.equity_total();
        // Negated comparison so NaN totals fail the check.
        if !((assets - liabilities - equity).abs() <= tolerance) {
            return Err(SimulationError::balance_sheet_invariant(
                &self.name,
                assets,
                liabilities,
                equity,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_TOLERANCE;

    fn banks() -> SectorLedger {
        let mut sector = SectorLedger::new("Banks");
        sector
            .add_account(Account::new("Loans", AccountCategory::Asset, 800.0))
            .unwrap();
        sector
            .add_account(Account::new("Reserves", AccountCategory::Asset, 400.0))
            .unwrap();
        sector
            .add_account(Account::new("Deposits", AccountCategory::Liability, 1000.0))
            .unwrap();
        sector
            .add_account(Account::new("BankEquity", AccountCategory::Equity, 0.0))
            .unwrap();
        sector
    }

    #[test]
    fn test_totals() {
        let sector = banks();
        assert_eq!(sector.assets_total(), 1200.0);
        assert_eq!(sector.liabilities_total(), 1000.0);
        assert_eq!(sector.equity_total(), 0.0);
        assert_eq!(sector.net_position(), 200.0);
    }

    #[test]
    fn test_duplicate_account_rejected() {
        let mut sector = banks();
        let result = sector.add_account(Account::new("Loans", AccountCategory::Asset, 1.0));
        assert!(matches!(
            result.unwrap_err(),
            SimulationError::DuplicateAccount { .. }
        ));
        assert_eq!(sector.account("Loans").unwrap().balance, 800.0);
    }

    #[test]
    fn test_apply_unknown_account() {
        let mut sector = banks();
        let result = sector.apply("Bonds", 1.0);
        assert_eq!(
            result.unwrap_err(),
            SimulationError::unknown_account("Banks", "Bonds")
        );
    }

    #[test]
    fn test_recompute_equity_returns_delta() {
        let mut sector = banks();
        assert!(sector.assert_balanced(DEFAULT_TOLERANCE).is_err());

        let delta = sector.recompute_equity();
        assert_eq!(delta, Some(200.0));
        assert_eq!(sector.account("BankEquity").unwrap().balance, 200.0);
        assert!(sector.assert_balanced(DEFAULT_TOLERANCE).is_ok());
    }

    #[test]
    fn test_recompute_equity_splits_evenly() {
        let mut sector = SectorLedger::new("Private");
        sector
            .add_account(Account::new("Deposits", AccountCategory::Asset, 90.0))
            .unwrap();
        sector
            .add_account(Account::new("Retained", AccountCategory::Equity, 80.0))
            .unwrap();
        sector
            .add_account(Account::new("Capital", AccountCategory::Equity, 5.0))
            .unwrap();

        let delta = sector.recompute_equity().unwrap();

        assert!((delta - 5.0).abs() < 1e-12);
        assert_eq!(sector.account("Retained").unwrap().balance, 45.0);
        assert_eq!(sector.account("Capital").unwrap().balance, 45.0);
    }

    #[test]
    fn test_recompute_equity_without_equity_accounts() {
        let mut sector = SectorLedger::new("Offshore");
        sector
            .add_account(Account::new("Cash", AccountCategory::Asset, 3.0))
            .unwrap();
        assert_eq!(sector.recompute_equity(), None);
        assert!(sector.assert_balanced(DEFAULT_TOLERANCE).is_err());
    }

    #[test]
    fn test_assert_balanced_rejects_nan() {
        let mut sector = banks();
        sector.apply("Loans", f64::NAN).unwrap();
        sector.recompute_equity();
        assert!(matches!(
            sector.assert_balanced(DEFAULT_TOLERANCE).unwrap_err(),
            SimulationError::BalanceSheetInvariant { .. }
        ));
    }
}
