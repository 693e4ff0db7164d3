//! Simulation engine
//!
//! This module provides the `Simulation` that steps the economy forward one
//! period at a time by coordinating the policies, the transaction catalogue
//! and the ledger.
//!
//! Each step runs, in order:
//! 1. Snapshot pre-step balances; every policy reads only this snapshot
//! 2. Resolve spending, credit changes and interest flows
//! 3. Derive taxes from the resolved flows
//! 4. Build the ordered transaction sequence
//! 5. Apply every non-empty transaction
//! 6. Issue (or retire) bonds so the TGA returns to its target
//! 7. Recompute equity in every sector
//! 8. Record stocks, flows and metrics
//!
//! A step is atomic: if anything fails, the ledger is restored to its
//! pre-step state and nothing is recorded.

use crate::config::ModelConfig;
use crate::core::catalogue::{self, select_transactions};
use crate::core::chart::build_ledger;
use crate::core::history::{balance_of, History, Record, StepRecord};
use crate::core::ledger::Ledger;
use crate::core::metrics::compute_metrics;
use crate::policy::PolicySet;
use crate::types::{SimulationError, Transaction};

/// Flow amounts of one period
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodFlows {
    pub gov_spending: f64,
    /// Resolved change in bank loans, before the repayment clamp
    pub loan_change: f64,
    pub interest_on_loans: f64,
    pub interest_on_deposits: f64,
    pub interest_on_reserves: f64,
    pub interest_on_bonds: f64,
    /// Resolved change in private-to-private loans, before the repayment clamp
    pub private_loan_change: f64,
    pub taxes: f64,
    /// Bonds issued to hit the TGA target; negative when bonds are retired
    pub bond_issuance: f64,
}

impl PeriodFlows {
    /// Income subject to tax this period
    pub fn tax_base(&self) -> f64 {
        self.gov_spending + self.interest_on_deposits + self.interest_on_bonds
            - self.interest_on_loans
    }

    pub fn to_record(&self) -> Record {
        [
            ("gov_spending", self.gov_spending),
            ("loan_change", self.loan_change),
            ("interest_on_loans", self.interest_on_loans),
            ("interest_on_deposits", self.interest_on_deposits),
            ("interest_on_reserves", self.interest_on_reserves),
            ("interest_on_bonds", self.interest_on_bonds),
            ("private_loan_change", self.private_loan_change),
            ("taxes", self.taxes),
            ("bond_issuance", self.bond_issuance),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
    }
}

/// A stock-flow consistent simulation run
///
/// Exclusively owns its ledger and history; independent instances never
/// share state.
pub struct Simulation {
    config: ModelConfig,
    policies: PolicySet,
    ledger: Ledger,
    history: History,
}

impl Simulation {
    /// Create a simulation with the default policies for `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the initial
    /// balances name accounts outside the chart.
    pub fn new(config: ModelConfig) -> Result<Self, SimulationError> {
        let policies = PolicySet::from_config(&config);
        Self::with_policies(config, policies)
    }

    /// Create a simulation with explicit policies
    pub fn with_policies(
        config: ModelConfig,
        policies: PolicySet,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let ledger = build_ledger(&config.initial, config.tolerance)?;
        Ok(Simulation {
            config,
            policies,
            ledger,
            history: History::new(),
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn into_history(self) -> History {
        self.history
    }

    /// Current balances
    pub fn snapshot(&self) -> Record {
        self.ledger.snapshot()
    }

    /// Advance the economy by one period
    ///
    /// # Returns
    ///
    /// The records appended to the history for this step.
    ///
    /// # Errors
    ///
    /// Propagates any ledger error. The ledger is rolled back to its pre-step
    /// state and the history is left untouched.
    pub fn step(&mut self, step: usize) -> Result<StepRecord, SimulationError> {
        let checkpoint = self.ledger.checkpoint();
        match self.execute_step(step) {
            Ok(record) => {
                self.history.push(record.clone());
                Ok(record)
            }
            Err(err) => {
                tracing::warn!(step, error = %err, "step failed, restoring ledger");
                self.ledger.restore(checkpoint);
                Err(err)
            }
        }
    }

    /// Run every configured step in sequence
    ///
    /// Stops at the first failing step; the history then holds every step
    /// completed before it.
    pub fn run(&mut self) -> Result<History, SimulationError> {
        tracing::info!(steps = self.config.steps, "starting simulation run");
        for step in 0..self.config.steps {
            self.step(step)?;
        }
        tracing::info!(
            steps = self.history.len(),
            transactions = self.ledger.transactions().len(),
            "simulation run finished"
        );
        Ok(self.history.clone())
    }

    fn resolve_flows(&self, step: usize, balances: &Record) -> PeriodFlows {
        let config = &self.config;
        let mut flows = PeriodFlows {
            gov_spending: self.policies.spending.spending(step),
            loan_change: self.policies.loan_growth.change(step, balances),
            interest_on_loans: config.loan_rate * balance_of(balances, "Private", "Loans"),
            interest_on_deposits: config.deposit_rate * balance_of(balances, "Private", "Deposits"),
            interest_on_reserves: config.reserve_rate * balance_of(balances, "Banks", "Reserves"),
            interest_on_bonds: config.bond_rate * balance_of(balances, "Private", "GovBonds"),
            private_loan_change: self.policies.private_loan_growth.change(step, balances),
            ..PeriodFlows::default()
        };

        // NaN is kept so the taxes transaction is rejected rather than zeroed
        let taxes = self.policies.tax.taxes(step, balances, &flows);
        flows.taxes = if taxes < 0.0 { 0.0 } else { taxes };
        flows
    }

    fn build_transactions(flows: &PeriodFlows, balances: &Record) -> Vec<Transaction> {
        let deposits = balance_of(balances, "Private", "Deposits");
        let private_loans = balance_of(balances, "Private", "PrivateLoansAsset");

        let loan_tx = if flows.loan_change < 0.0 {
            catalogue::loan_repayment((-flows.loan_change).min(deposits))
        } else {
            catalogue::loan_creation(flows.loan_change)
        };
        let private_loan_tx = if flows.private_loan_change < 0.0 {
            catalogue::private_loan_repayment((-flows.private_loan_change).min(private_loans))
        } else {
            catalogue::private_loan_creation(flows.private_loan_change)
        };

        vec![
            loan_tx,
            private_loan_tx,
            catalogue::interest_on_loans(flows.interest_on_loans),
            catalogue::interest_on_deposits(flows.interest_on_deposits),
            catalogue::interest_on_reserves(flows.interest_on_reserves),
            catalogue::interest_on_bonds(flows.interest_on_bonds),
            catalogue::government_spending(flows.gov_spending),
            catalogue::taxes(flows.taxes),
        ]
    }

    fn execute_step(&mut self, step: usize) -> Result<StepRecord, SimulationError> {
        let balances = self.ledger.snapshot();
        let mut flows = self.resolve_flows(step, &balances);

        for tx in select_transactions(Self::build_transactions(&flows, &balances)) {
            self.ledger.apply(tx)?;
        }

        let tga = self.ledger.balance("Government", "TGA").unwrap_or(0.0);
        let tga_gap = self.config.tga_target - tga;
        if tga_gap.abs() > self.config.tolerance {
            self.ledger.apply(catalogue::bond_issue(tga_gap))?;
            flows.bond_issuance = tga_gap;
        }

        let adjustments = self.ledger.recompute_equity()?;

        let stocks = self.ledger.snapshot();
        let metrics = compute_metrics(&stocks, &self.ledger);
        let mut flow_record = flows.to_record();
        for (sector, delta) in adjustments {
            flow_record.insert(format!("equity_adjustment_{}", sector), delta);
        }

        tracing::debug!(
            step,
            gov_spending = flows.gov_spending,
            taxes = flows.taxes,
            loan_change = flows.loan_change,
            bond_issuance = flows.bond_issuance,
            "step completed"
        );

        Ok(StepRecord {
            stocks,
            flows: flow_record,
            metrics,
        })
    }
}
