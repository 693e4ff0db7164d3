//! Posting and transaction types
//!
//! A `Transaction` is a named bundle of `Posting`s describing one economic
//! event. Construction never checks that the referenced sectors and accounts
//! exist; that is validated when the ledger applies the transaction.

use std::collections::BTreeMap;

/// Default tolerance for balance checks
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A single signed delta to one account
#[derive(Debug, Clone, PartialEq)]
pub struct Posting {
    /// Sector that owns the account
    pub sector: String,

    /// Account name within the sector
    pub account: String,

    /// Literal delta added to the account balance
    pub amount: f64,
}

impl Posting {
    pub fn new(sector: impl Into<String>, account: impl Into<String>, amount: f64) -> Self {
        Posting {
            sector: sector.into(),
            account: account.into(),
            amount,
        }
    }

    /// Flattened `"sector:account"` key, matching snapshot keys
    pub fn key(&self) -> String {
        format!("{}:{}", self.sector, self.account)
    }
}

/// A named, ordered list of postings
///
/// Transactions are immutable once built: the ledger archives them verbatim
/// in its log after applying them.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Name of the economic flow (e.g. `government_spending`)
    pub name: String,

    /// Postings in application order
    pub postings: Vec<Posting>,

    /// Free-form numeric annotations (the catalogue records `amount`)
    pub metadata: BTreeMap<String, f64>,
}

impl Transaction {
    pub fn new(name: impl Into<String>, postings: Vec<Posting>) -> Self {
        Transaction {
            name: name.into(),
            postings,
            metadata: BTreeMap::new(),
        }
    }

    /// A transaction with no postings
    pub fn noop(name: impl Into<String>) -> Self {
        Transaction::new(name, Vec::new())
    }

    /// Attach a metadata value
    pub fn with_metadata(mut self, key: impl Into<String>, value: f64) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Whether applying this transaction would change nothing
    pub fn is_noop(&self) -> bool {
        self.postings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_posting_key() {
        let posting = Posting::new("Private", "Deposits", 1.0);
        assert_eq!(posting.key(), "Private:Deposits");
    }

    #[test]
    fn test_noop_has_no_postings() {
        let tx = Transaction::noop("taxes_zero");
        assert!(tx.is_noop());
        assert!(tx.metadata.is_empty());
    }

    #[test]
    fn test_metadata_is_attached() {
        let tx = Transaction::new("custom", vec![Posting::new("Banks", "Reserves", 2.0)])
            .with_metadata("amount", 2.0);
        assert!(!tx.is_noop());
        assert_eq!(tx.metadata.get("amount"), Some(&2.0));
    }
}
