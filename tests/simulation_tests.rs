//! End-to-end simulation tests
//!
//! These tests drive the engine through its public API and check the
//! accounting properties that must hold for every period:
//! - Each sector satisfies `assets - liabilities - equity = 0`
//! - Non-government and public net positions mirror each other
//! - Taxes are never negative
//! - The TGA is back at its target after every step
//! - Zero-amount flows never reach the transaction log

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;
    use sfc_money_engine::core::chart::sector_accounts;
    use sfc_money_engine::core::{balance_of, build_ledger, catalogue};
    use sfc_money_engine::io::{write_results, OUTPUT_FILES};
    use sfc_money_engine::{
        History, InitialBalances, ModelConfig, PolicySet, Posting, Record, Sector, Simulation,
        SimulationError, Transaction,
    };
    use std::fs;
    use tempfile::TempDir;

    const EPS: f64 = 1e-6;

    fn zero_config(steps: usize) -> ModelConfig {
        ModelConfig {
            steps,
            gov_spending: 0.0,
            tax_rate: 0.0,
            loan_growth: 0.0,
            private_loan_growth: 0.0,
            deposit_rate: 0.0,
            loan_rate: 0.0,
            reserve_rate: 0.0,
            bond_rate: 0.0,
            tga_target: 0.0,
            ..ModelConfig::default()
        }
    }

    fn run(config: ModelConfig) -> History {
        Simulation::new(config)
            .expect("valid config")
            .run()
            .expect("run succeeds")
    }

    /// `assets - liabilities - equity` for one sector, from a stock record
    fn sector_residual(stocks: &Record, sector: Sector) -> f64 {
        sector_accounts(sector)
            .iter()
            .map(|(account, category)| {
                category.sign() * balance_of(stocks, sector.as_str(), account)
            })
            .sum()
    }

    fn assert_period_invariants(history: &History, tga_target: f64) {
        assert_eq!(history.stocks.len(), history.flows.len());
        assert_eq!(history.flows.len(), history.metrics.len());

        for (step, ((stocks, flows), metrics)) in history
            .stocks
            .iter()
            .zip(&history.flows)
            .zip(&history.metrics)
            .enumerate()
        {
            for sector in Sector::ALL {
                let residual = sector_residual(stocks, sector);
                assert!(residual.abs() < EPS, "step {step} {sector}: {residual}");
            }
            let identity = metrics["NonGov_NFA"] + metrics["Public_NFP"];
            assert!(identity.abs() < EPS, "step {} identity {}", step, identity);
            assert!(metrics["Sector_Balance_Check"].abs() < EPS);
            assert!(flows["taxes"] >= 0.0, "step {} negative taxes", step);
            let tga = balance_of(stocks, "Government", "TGA");
            assert!((tga - tga_target).abs() < EPS, "step {} tga {}", step, tga);
        }
    }

    #[test]
    fn test_default_single_step() {
        let mut sim = Simulation::new(ModelConfig::default()).unwrap();
        let before = sim.snapshot();

        let record = sim.step(0).unwrap();
        let f = &record.flows;

        assert!((f["loan_change"] - 8.0).abs() < 1e-9);
        assert!((f["interest_on_loans"] - 0.04 / 12.0 * 800.0).abs() < 1e-9);
        assert!((f["interest_on_deposits"] - 1.0).abs() < 1e-9);
        assert!((f["interest_on_bonds"] - 1.25).abs() < 1e-9);
        let income = f["interest_on_deposits"] + f["interest_on_bonds"];
        let expected_taxes = 0.2 * (100.0 + income - f["interest_on_loans"]);
        assert!((f["taxes"] - expected_taxes).abs() < 1e-9);

        let m1_before = before["Private:Deposits"] + before["Private:Currency"];
        let inflows = f["gov_spending"] + f["loan_change"] + income;
        let outflows = f["taxes"] + f["interest_on_loans"] + f["bond_issuance"];
        let expected_m1 = m1_before + inflows - outflows;
        assert!((record.metrics["Money_M1"] - expected_m1).abs() < 1e-9);
        assert!(record.metrics["Sector_Balance_Check"].abs() < EPS);

        // The TGA ended the step where it started
        assert!(f["bond_issuance"] > 0.0);
        assert!(record.stocks["Government:TGA"].abs() < EPS);
        let bonds = record.stocks["Private:GovBonds"];
        assert!((bonds - 500.0 - f["bond_issuance"]).abs() < 1e-9);
    }

    #[test]
    fn test_default_run_invariants() {
        let config = ModelConfig::default();
        let history = run(config.clone());
        assert_eq!(history.len(), config.steps);
        assert_period_invariants(&history, config.tga_target);
    }

    #[rstest]
    #[case::zero_target(0.0)]
    #[case::positive_target(250.0)]
    #[case::negative_target(-50.0)]
    fn test_tga_is_financed_to_target(#[case] tga_target: f64) {
        let config = ModelConfig {
            steps: 24,
            tga_target,
            ..ModelConfig::default()
        };
        let history = run(config);
        assert_period_invariants(&history, tga_target);
    }

    #[test]
    fn test_tax_surplus_retires_bonds() {
        let config = ModelConfig {
            steps: 2,
            tax_rate: 2.0,
            ..ModelConfig::default()
        };
        let history = run(config);

        let mut private_bonds = 500.0;
        for (stocks, flows) in history.stocks.iter().zip(&history.flows) {
            let issued = flows["bond_issuance"];
            assert!(issued < 0.0);
            let bonds = stocks["Private:GovBonds"];
            assert!(bonds < private_bonds);
            assert!((bonds - private_bonds - issued).abs() < 1e-9);
            assert!(stocks["Government:TGA"].abs() < EPS);
            private_bonds = bonds;
        }
        assert_period_invariants(&history, 0.0);
    }

    #[test]
    fn test_zero_everything() {
        let mut sim = Simulation::new(zero_config(10)).unwrap();
        let initial = sim.snapshot();

        let history = sim.run().unwrap();

        assert_eq!(history.len(), 10);
        for stocks in &history.stocks {
            assert_eq!(stocks, &initial);
        }
        for flows in &history.flows {
            assert!(flows.values().all(|v| *v == 0.0), "{:?}", flows);
        }
        assert!(sim.ledger().transactions().is_empty());
    }

    #[test]
    fn test_zero_flows_never_logged() {
        // Only spending, taxes and bond issuance are non-zero
        let config = ModelConfig {
            steps: 4,
            gov_spending: 60.0,
            tax_rate: 0.5,
            ..zero_config(4)
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.run().unwrap();

        let log = sim.ledger().transactions();
        assert_eq!(log.len(), 4 * 3);
        assert!(log.iter().all(|tx| !tx.is_noop()));
        assert!(log
            .chunks(3)
            .all(|chunk| chunk[0].name == "government_spending"
                && chunk[1].name == "taxes"
                && chunk[2].name == "bond_issue"));
    }

    #[test]
    fn test_unbalanced_injected_transaction() {
        let mut ledger = build_ledger(&InitialBalances::default(), EPS).unwrap();
        let posting = Posting::new("Private", "Deposits", 50.0);
        let tx = Transaction::new("helicopter", vec![posting]);

        let err = ledger.apply(tx).unwrap_err();

        assert!(matches!(
            err,
            SimulationError::UnbalancedTransaction { ref name, imbalance }
                if name == "helicopter" && imbalance == 50.0
        ));
        assert!(ledger.transactions().is_empty());
    }

    #[test]
    fn test_supplemented_flows_apply_cleanly() {
        let mut ledger = build_ledger(&InitialBalances::default(), EPS).unwrap();
        ledger.apply(catalogue::bond_sale_to_cb(40.0)).unwrap();
        ledger.apply(catalogue::bank_debt_issue(25.0)).unwrap();
        ledger.apply(catalogue::bank_debt_repayment(10.0)).unwrap();
        ledger.recompute_equity().unwrap();

        assert_eq!(ledger.balance("CentralBank", "GovBonds"), Some(440.0));
        assert_eq!(ledger.balance("Government", "TGA"), Some(40.0));
        assert_eq!(ledger.balance("Private", "BankDebt"), Some(15.0));
        assert_eq!(ledger.balance("Banks", "BankDebt"), Some(15.0));
        assert_eq!(ledger.balance("Private", "Deposits"), Some(1185.0));
    }

    #[test]
    fn test_runs_are_deterministic() {
        let first = run(ModelConfig::default());
        let second = run(ModelConfig::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_spending_override_changes_path() {
        let config = ModelConfig {
            steps: 6,
            ..ModelConfig::default()
        };
        let policies = PolicySet::from_config(&config)
            .with_spending(|step: usize| if step < 3 { 100.0 } else { 300.0 });
        let mut sim = Simulation::with_policies(config, policies).unwrap();
        let history = sim.run().unwrap();

        let spending: Vec<f64> = history.flows.iter().map(|f| f["gov_spending"]).collect();
        assert_eq!(spending, vec![100.0, 100.0, 100.0, 300.0, 300.0, 300.0]);
        assert_period_invariants(&history, 0.0);
    }

    #[test]
    fn test_deleveraging_keeps_invariants() {
        let config = ModelConfig {
            steps: 36,
            loan_growth: -0.05,
            ..ModelConfig::default()
        };
        let history = run(config);
        let debt: Vec<f64> = history.metrics.iter().map(|m| m["Private_Debt"]).collect();
        assert!(debt.windows(2).all(|w| w[1] < w[0]));
        assert_period_invariants(&history, 0.0);
    }

    #[test]
    fn test_failed_step_keeps_prior_history() {
        let config = ModelConfig {
            steps: 5,
            ..ModelConfig::default()
        };
        let policies = PolicySet::from_config(&config)
            .with_spending(|step: usize| if step == 3 { f64::INFINITY } else { 100.0 });
        let mut sim = Simulation::with_policies(config, policies).unwrap();

        let err = sim.run().unwrap_err();

        assert!(err.is_accounting_defect());
        assert_eq!(sim.history().len(), 3);
        let last = sim.history().last().unwrap();
        assert_eq!(sim.snapshot(), last.stocks);
    }

    #[test]
    fn test_results_written_as_csv() {
        let history = run(ModelConfig {
            steps: 5,
            ..ModelConfig::default()
        });
        let dir = TempDir::new().expect("Failed to create temp dir");

        write_results(dir.path(), &history).unwrap();

        for name in OUTPUT_FILES {
            let content = fs::read_to_string(dir.path().join(name)).unwrap();
            assert_eq!(content.lines().count(), 6, "{}", name);
        }
        let metrics = fs::read_to_string(dir.path().join("metrics.csv")).unwrap();
        assert!(metrics.starts_with("Money_M1,Private_Debt,"));
        let flows = fs::read_to_string(dir.path().join("flows.csv")).unwrap();
        assert!(flows
            .lines()
            .next()
            .unwrap()
            .ends_with("equity_adjustment_CentralBank"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn taxes_never_negative(
            gov_spending in -500.0f64..500.0,
            tax_rate in -1.0f64..1.0,
            loan_rate in 0.0f64..0.05,
            deposit_rate in 0.0f64..0.05,
            bond_rate in 0.0f64..0.05,
        ) {
            let config = ModelConfig {
                steps: 6,
                gov_spending,
                tax_rate,
                loan_rate,
                deposit_rate,
                bond_rate,
                ..ModelConfig::default()
            };
            let history = run(config);
            for flows in &history.flows {
                prop_assert!(flows["taxes"] >= 0.0);
            }
            for metrics in &history.metrics {
                prop_assert!(metrics["Sector_Balance_Check"].abs() < EPS);
            }
        }
    }
}
