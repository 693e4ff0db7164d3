//! Transaction catalogue
//!
//! Pure constructors mapping a signed amount to a balanced [`Transaction`].
//! Each flow is a fixed list of legs `(sector, account, coefficient)`; the
//! posting for a leg carries `coefficient * amount` as its literal delta. The
//! sign convention lives in the account category, so liability and equity
//! legs use the same literal delta as the asset they mirror.
//!
//! An amount of exactly zero yields an empty no-op named `<flow>_zero`, which
//! [`select_transactions`] drops before anything reaches the ledger.

use crate::types::{Posting, Sector, Transaction};

use Sector::{Banks, CentralBank, Government, Private};

type Leg = (Sector, &'static str, f64);

/// Every economic flow the catalogue can build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    GovernmentSpending,
    Taxes,
    LoanCreation,
    LoanRepayment,
    PrivateLoanCreation,
    PrivateLoanRepayment,
    InterestOnLoans,
    InterestOnDeposits,
    InterestOnReserves,
    InterestOnBonds,
    BondIssue,
    BondSaleToCentralBank,
    BankDebtIssue,
    BankDebtRepayment,
}

impl FlowKind {
    pub const ALL: [FlowKind; 14] = [
        FlowKind::GovernmentSpending,
        FlowKind::Taxes,
        FlowKind::LoanCreation,
        FlowKind::LoanRepayment,
        FlowKind::PrivateLoanCreation,
        FlowKind::PrivateLoanRepayment,
        FlowKind::InterestOnLoans,
        FlowKind::InterestOnDeposits,
        FlowKind::InterestOnReserves,
        FlowKind::InterestOnBonds,
        FlowKind::BondIssue,
        FlowKind::BondSaleToCentralBank,
        FlowKind::BankDebtIssue,
        FlowKind::BankDebtRepayment,
    ];

    /// Transaction name recorded in the ledger log
    pub fn name(self) -> &'static str {
        match self {
            FlowKind::GovernmentSpending => "government_spending",
            FlowKind::Taxes => "taxes",
            FlowKind::LoanCreation => "loan_creation",
            FlowKind::LoanRepayment => "loan_repayment",
            FlowKind::PrivateLoanCreation => "private_loan_creation",
            FlowKind::PrivateLoanRepayment => "private_loan_repayment",
            FlowKind::InterestOnLoans => "interest_on_loans",
            FlowKind::InterestOnDeposits => "interest_on_deposits",
            FlowKind::InterestOnReserves => "interest_on_reserves",
            FlowKind::InterestOnBonds => "interest_on_bonds",
            FlowKind::BondIssue => "bond_issue",
            FlowKind::BondSaleToCentralBank => "bond_sale_to_cb",
            FlowKind::BankDebtIssue => "bank_debt_issue",
            FlowKind::BankDebtRepayment => "bank_debt_repayment",
        }
    }

    fn legs(self) -> &'static [Leg] {
        match self {
            // Treasury pays out of the TGA; reserves and deposits rise
            FlowKind::GovernmentSpending | FlowKind::InterestOnBonds => &[
                (Private, "Deposits", 1.0),
                (Banks, "Deposits", 1.0),
                (Banks, "Reserves", 1.0),
                (CentralBank, "Reserves", 1.0),
                (CentralBank, "TGA", -1.0),
                (Government, "TGA", -1.0),
            ],
            FlowKind::Taxes => &[
                (Private, "Deposits", -1.0),
                (Banks, "Deposits", -1.0),
                (Banks, "Reserves", -1.0),
                (CentralBank, "Reserves", -1.0),
                (CentralBank, "TGA", 1.0),
                (Government, "TGA", 1.0),
            ],
            FlowKind::LoanCreation => &[
                (Banks, "Loans", 1.0),
                (Private, "Loans", 1.0),
                (Banks, "Deposits", 1.0),
                (Private, "Deposits", 1.0),
            ],
            FlowKind::LoanRepayment => &[
                (Private, "Deposits", -1.0),
                (Banks, "Deposits", -1.0),
                (Banks, "Loans", -1.0),
                (Private, "Loans", -1.0),
            ],
            FlowKind::PrivateLoanCreation => &[
                (Private, "PrivateLoansAsset", 1.0),
                (Private, "PrivateLoansLiability", 1.0),
            ],
            FlowKind::PrivateLoanRepayment => &[
                (Private, "PrivateLoansAsset", -1.0),
                (Private, "PrivateLoansLiability", -1.0),
            ],
            FlowKind::InterestOnLoans => &[(Private, "Deposits", -1.0), (Banks, "Deposits", -1.0)],
            FlowKind::InterestOnDeposits => &[(Private, "Deposits", 1.0), (Banks, "Deposits", 1.0)],
            FlowKind::InterestOnReserves => {
                &[(Banks, "Reserves", 1.0), (CentralBank, "Reserves", 1.0)]
            }
            // Private sector buys new bonds with deposits; proceeds land in the TGA
            FlowKind::BondIssue => &[
                (Private, "Deposits", -1.0),
                (Banks, "Deposits", -1.0),
                (Banks, "Reserves", -1.0),
                (CentralBank, "Reserves", -1.0),
                (CentralBank, "TGA", 1.0),
                (Government, "TGA", 1.0),
                (Government, "GovBonds", 1.0),
                (Private, "GovBonds", 1.0),
            ],
            FlowKind::BondSaleToCentralBank => &[
                (Government, "GovBonds", 1.0),
                (CentralBank, "GovBonds", 1.0),
                (CentralBank, "TGA", 1.0),
                (Government, "TGA", 1.0),
            ],
            FlowKind::BankDebtIssue => &[
                (Private, "Deposits", -1.0),
                (Banks, "Deposits", -1.0),
                (Private, "BankDebt", 1.0),
                (Banks, "BankDebt", 1.0),
            ],
            FlowKind::BankDebtRepayment => &[
                (Private, "Deposits", 1.0),
                (Banks, "Deposits", 1.0),
                (Private, "BankDebt", -1.0),
                (Banks, "BankDebt", -1.0),
            ],
        }
    }

    /// Build the transaction for `amount`
    ///
    /// Returns an empty `<name>_zero` transaction when `amount == 0`.
    pub fn transaction(self, amount: f64) -> Transaction {
        if amount == 0.0 {
            return Transaction::noop(format!("{}_zero", self.name()));
        }
        let postings = self
            .legs()
            .iter()
            .map(|&(sector, account, coefficient)| {
                Posting::new(sector, account, coefficient * amount)
            })
            .collect();
        Transaction::new(self.name(), postings).with_metadata("amount", amount)
    }
}

pub fn government_spending(amount: f64) -> Transaction {
    FlowKind::GovernmentSpending.transaction(amount)
}

pub fn taxes(amount: f64) -> Transaction {
    FlowKind::Taxes.transaction(amount)
}

pub fn loan_creation(amount: f64) -> Transaction {
    FlowKind::LoanCreation.transaction(amount)
}

pub fn loan_repayment(amount: f64) -> Transaction {
    FlowKind::LoanRepayment.transaction(amount)
}

pub fn private_loan_creation(amount: f64) -> Transaction {
    FlowKind::PrivateLoanCreation.transaction(amount)
}

pub fn private_loan_repayment(amount: f64) -> Transaction {
    FlowKind::PrivateLoanRepayment.transaction(amount)
}

pub fn interest_on_loans(amount: f64) -> Transaction {
    FlowKind::InterestOnLoans.transaction(amount)
}

pub fn interest_on_deposits(amount: f64) -> Transaction {
    FlowKind::InterestOnDeposits.transaction(amount)
}

pub fn interest_on_reserves(amount: f64) -> Transaction {
    FlowKind::InterestOnReserves.transaction(amount)
}

pub fn interest_on_bonds(amount: f64) -> Transaction {
    FlowKind::InterestOnBonds.transaction(amount)
}

/// Bond issuance; a negative amount retires bonds
pub fn bond_issue(amount: f64) -> Transaction {
    FlowKind::BondIssue.transaction(amount)
}

pub fn bond_sale_to_cb(amount: f64) -> Transaction {
    FlowKind::BondSaleToCentralBank.transaction(amount)
}

pub fn bank_debt_issue(amount: f64) -> Transaction {
    FlowKind::BankDebtIssue.transaction(amount)
}

pub fn bank_debt_repayment(amount: f64) -> Transaction {
    FlowKind::BankDebtRepayment.transaction(amount)
}

/// Drop no-op transactions, keeping order
pub fn select_transactions(txs: Vec<Transaction>) -> Vec<Transaction> {
    txs.into_iter()
        .filter(|tx| {
            if tx.is_noop() {
                tracing::trace!(transaction = %tx.name, "skipping no-op transaction");
            }
            !tx.is_noop()
        })
        .collect()
}
