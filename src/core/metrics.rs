//! Derived aggregates recorded after every step

use crate::core::history::{balance_of, Record};
use crate::core::ledger::Ledger;
use crate::types::Sector;

fn net_position(ledger: &Ledger, sector: Sector) -> f64 {
    ledger
        .sector(sector.as_str())
        .map(|s| s.net_position())
        .unwrap_or(0.0)
}

/// Monetary aggregates and sectoral net financial positions
///
/// `Sector_Balance_Check` is `NonGov_NFA + Public_NFP`, which must stay at
/// zero in a closed economy.
pub fn compute_metrics(stocks: &Record, ledger: &Ledger) -> Record {
    let deposits = balance_of(stocks, "Private", "Deposits");
    let currency = balance_of(stocks, "Private", "Currency");

    let private_nfa = net_position(ledger, Sector::Private);
    let banks_nfa = net_position(ledger, Sector::Banks);
    let public_nfp =
        net_position(ledger, Sector::Government) + net_position(ledger, Sector::CentralBank);
    let non_gov_nfa = private_nfa + banks_nfa;

    [
        ("Money_M1", deposits + currency),
        ("Private_Debt", balance_of(stocks, "Private", "Loans")),
        ("Private_Bonds", balance_of(stocks, "Private", "GovBonds")),
        ("Bank_Reserves", balance_of(stocks, "Banks", "Reserves")),
        ("Private_NFA", private_nfa),
        ("Banks_NFA", banks_nfa),
        ("NonGov_NFA", non_gov_nfa),
        ("Public_NFP", public_nfp),
        ("Sector_Balance_Check", non_gov_nfa + public_nfp),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitialBalances;
    use crate::core::chart::build_ledger;
    use crate::types::DEFAULT_TOLERANCE;

    #[test]
    fn test_default_chart_metrics() {
        let ledger = build_ledger(&InitialBalances::default(), DEFAULT_TOLERANCE).unwrap();
        let metrics = compute_metrics(&ledger.snapshot(), &ledger);

        assert_eq!(metrics["Money_M1"], 1200.0);
        assert_eq!(metrics["Private_Debt"], 800.0);
        assert_eq!(metrics["Private_Bonds"], 500.0);
        assert_eq!(metrics["Bank_Reserves"], 400.0);
        assert_eq!(metrics["Private_NFA"], 900.0);
        assert_eq!(metrics["Banks_NFA"], 0.0);
        assert_eq!(metrics["NonGov_NFA"], 900.0);
        assert_eq!(metrics["Public_NFP"], -900.0);
        assert_eq!(metrics["Sector_Balance_Check"], 0.0);
    }

    #[test]
    fn test_metric_order() {
        let ledger = build_ledger(&InitialBalances::empty(), DEFAULT_TOLERANCE).unwrap();
        let metrics = compute_metrics(&ledger.snapshot(), &ledger);
        assert_eq!(metrics.keys().next().map(String::as_str), Some("Money_M1"));
        assert_eq!(
            metrics.keys().last().map(String::as_str),
            Some("Sector_Balance_Check")
        );
    }
}
