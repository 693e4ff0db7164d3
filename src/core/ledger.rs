//! Double-entry ledger
//!
//! The `Ledger` owns every sector balance sheet and is the only place where
//! transactions mutate balances.
//!
//! The ledger enforces:
//! - Every posting references an existing sector and account
//! - The signed sum of a transaction's postings is zero within tolerance
//! - Validation happens before any mutation, so a rejected transaction leaves
//!   no trace
//! - Each sector satisfies `assets - liabilities - equity = 0` after equity
//!   recompute

use crate::core::history::Record;
use crate::core::sector::SectorLedger;
use crate::types::{SimulationError, Transaction, DEFAULT_TOLERANCE};
use indexmap::IndexMap;

/// Saved ledger state used to undo a partially applied step
#[derive(Debug, Clone)]
pub struct Checkpoint {
    sectors: IndexMap<String, SectorLedger>,
    log_len: usize,
}

/// All sector balance sheets plus an append-only transaction log
///
/// The log is an audit trail only; balances are never rebuilt from it.
#[derive(Debug, Clone)]
pub struct Ledger {
    sectors: IndexMap<String, SectorLedger>,
    transactions: Vec<Transaction>,
    tolerance: f64,
}

impl Ledger {
    /// Create a ledger from sector balance sheets
    ///
    /// Sectors keep the order given, which is the snapshot order.
    pub fn new(sectors: impl IntoIterator<Item = SectorLedger>) -> Self {
        Ledger {
            sectors: sectors
                .into_iter()
                .map(|sector| (sector.name().to_string(), sector))
                .collect(),
            transactions: Vec::new(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Use a different tolerance for `apply` and equity checks
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn sector(&self, name: &str) -> Option<&SectorLedger> {
        self.sectors.get(name)
    }

    /// Iterate over sectors in ledger order
    pub fn sectors(&self) -> impl Iterator<Item = &SectorLedger> {
        self.sectors.values()
    }

    /// Applied transactions, oldest first
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Current balance of one account, if it exists
    pub fn balance(&self, sector: &str, account: &str) -> Option<f64> {
        self.sectors
            .get(sector)
            .and_then(|s| s.account(account))
            .map(|a| a.balance)
    }

    /// Signed sum of a transaction's postings under the category sign convention
    ///
    /// # Errors
    ///
    /// Returns `UnknownAccount` for the first posting whose sector or account
    /// is not in the ledger.
    pub fn imbalance(&self, tx: &Transaction) -> Result<f64, SimulationError> {
        tx.postings.iter().try_fold(0.0, |total, posting| {
            let account = self
                .sectors
                .get(&posting.sector)
                .and_then(|sector| sector.account(&posting.account))
                .ok_or_else(|| {
                    SimulationError::unknown_account(&posting.sector, &posting.account)
                })?;
            Ok(total + posting.amount * account.category.sign())
        })
    }

    /// Apply a transaction using the ledger tolerance
    pub fn apply(&mut self, tx: Transaction) -> Result<(), SimulationError> {
        self.apply_with_tolerance(tx, self.tolerance)
    }

    /// Validate then apply a transaction, archiving it in the log
    ///
    /// # Errors
    ///
    /// - `UnknownAccount` if any posting references a missing sector/account
    /// - `UnbalancedTransaction` if `|imbalance| > tolerance` or the sum is
    ///   not finite
    ///
    /// In both cases no balance is changed and nothing is logged.
    pub fn apply_with_tolerance(
        &mut self,
        tx: Transaction,
        tolerance: f64,
    ) -> Result<(), SimulationError> {
        let imbalance = self.imbalance(&tx)?;
        if !(imbalance.abs() <= tolerance) {
            return Err(SimulationError::unbalanced_transaction(&tx.name, imbalance));
        }

        for posting in &tx.postings {
            // Existence was checked by `imbalance`
            if let Some(sector) = self.sectors.get_mut(&posting.sector) {
                sector.apply(&posting.account, posting.amount)?;
            }
        }

        tracing::debug!(
            transaction = %tx.name,
            postings = tx.postings.len(),
            "applied transaction"
        );
        self.transactions.push(tx);
        Ok(())
    }

    /// Reassign equity in every sector and verify each balance sheet
    ///
    /// # Returns
    ///
    /// The change in total equity for each sector that has equity accounts,
    /// in ledger order.
    ///
    /// # Errors
    ///
    /// Returns `BalanceSheetInvariant` for the first sector whose identity
    /// does not hold afterwards.
    pub fn recompute_equity(&mut self) -> Result<IndexMap<String, f64>, SimulationError> {
        let mut adjustments = IndexMap::new();
        for (name, sector) in self.sectors.iter_mut() {
            if let Some(delta) = sector.recompute_equity() {
                adjustments.insert(name.clone(), delta);
            }
            sector.assert_balanced(self.tolerance)?;
        }
        Ok(adjustments)
    }

    /// Flattened `"sector:account" -> balance` view of every account
    pub fn snapshot(&self) -> Record {
        let mut snapshot = Record::new();
        for (sector_name, sector) in &self.sectors {
            for account in sector.accounts() {
                let key = format!("{}:{}", sector_name, account.name);
                snapshot.insert(key, account.balance);
            }
        }
        snapshot
    }

    /// Save balances and log position
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            sectors: self.sectors.clone(),
            log_len: self.transactions.len(),
        }
    }

    /// Roll back to a checkpoint taken from this ledger
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.sectors = checkpoint.sectors;
        self.transactions.truncate(checkpoint.log_len);
    }
}
