//! Default chart of accounts
//!
//! Defines which accounts each sector holds and builds a ledger from a set of
//! initial balances.

use crate::config::InitialBalances;
use crate::core::ledger::Ledger;
use crate::core::sector::SectorLedger;
use crate::types::{Account, AccountCategory, Sector, SimulationError};

use AccountCategory::{Asset, Equity, Liability};

/// Accounts of one sector, in snapshot order
pub fn sector_accounts(sector: Sector) -> &'static [(&'static str, AccountCategory)] {
    match sector {
        Sector::Private => &[
            ("Deposits", Asset),
            ("Loans", Liability),
            ("GovBonds", Asset),
            ("Currency", Asset),
            ("PrivateLoansAsset", Asset),
            ("PrivateLoansLiability", Liability),
            ("BankDebt", Asset),
            ("NetWorth", Equity),
        ],
        Sector::Banks => &[
            ("Loans", Asset),
            ("Reserves", Asset),
            ("Deposits", Liability),
            ("BankDebt", Liability),
            ("BankEquity", Equity),
        ],
        Sector::Government => &[
            ("TGA", Asset),
            ("GovBonds", Liability),
            ("GovEquity", Equity),
        ],
        Sector::CentralBank => &[
            ("Reserves", Liability),
            ("Currency", Liability),
            ("TGA", Liability),
            ("GovBonds", Asset),
            ("CBEq", Equity),
        ],
    }
}

/// Check every initial balance names an account of the chart
///
/// # Errors
///
/// Returns `UnknownInitialBalance` for the first entry outside the chart.
pub fn validate_initial(initial: &InitialBalances) -> Result<(), SimulationError> {
    for (sector_name, account_name, _) in initial.iter() {
        let known = sector_name
            .parse::<Sector>()
            .map(|sector| {
                sector_accounts(sector)
                    .iter()
                    .any(|(name, _)| *name == account_name)
            })
            .unwrap_or(false);
        if !known {
            return Err(SimulationError::unknown_initial_balance(
                sector_name,
                account_name,
            ));
        }
    }
    Ok(())
}

/// Build the four-sector ledger from initial balances
///
/// Equity is recomputed once so the starting balance sheets satisfy the
/// sectoral identity regardless of the equity values supplied.
///
/// # Errors
///
/// - `UnknownInitialBalance` if `initial` names an account outside the chart
/// - `BalanceSheetInvariant` if a starting balance sheet cannot be balanced
pub fn build_ledger(initial: &InitialBalances, tolerance: f64) -> Result<Ledger, SimulationError> {
    validate_initial(initial)?;

    let mut sectors = Vec::with_capacity(Sector::ALL.len());
    for sector in Sector::ALL {
        let mut ledger = SectorLedger::new(sector.as_str());
        for &(name, category) in sector_accounts(sector) {
            let balance = initial.get(sector.as_str(), name).unwrap_or(0.0);
            ledger.add_account(Account::new(name, category, balance))?;
        }
        sectors.push(ledger);
    }

    let mut ledger = Ledger::new(sectors).with_tolerance(tolerance);
    ledger.recompute_equity()?;
    Ok(ledger)
}
