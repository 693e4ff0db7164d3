use crate::config::ModelConfig;
use crate::io::load_config;
use crate::types::SimulationError;
use clap::Parser;
use std::path::PathBuf;

/// Run a stock-flow consistent money system simulation
#[derive(Parser, Debug)]
#[command(name = "sfc-money-engine")]
#[command(about = "Run a stock-flow consistent money system simulation", long_about = None)]
pub struct CliArgs {
    /// Number of monthly steps
    #[arg(long = "steps", value_name = "N", help = "Number of monthly steps")]
    pub steps: Option<usize>,

    /// Directory receiving stocks.csv, flows.csv and metrics.csv
    #[arg(
        long = "output-dir",
        value_name = "DIR",
        default_value = "outputs",
        help = "Output directory"
    )]
    pub output_dir: PathBuf,

    /// JSON file with model parameters and initial balances
    #[arg(long = "config", value_name = "FILE", help = "JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(
        long = "gov-spending",
        value_name = "AMOUNT",
        help = "Government spending per step"
    )]
    pub gov_spending: Option<f64>,

    #[arg(
        long = "tax-rate",
        value_name = "RATE",
        help = "Tax rate on the period tax base"
    )]
    pub tax_rate: Option<f64>,

    #[arg(
        long = "loan-growth",
        value_name = "RATE",
        help = "Bank loan growth per step"
    )]
    pub loan_growth: Option<f64>,

    #[arg(
        long = "private-loan-growth",
        value_name = "RATE",
        help = "Private-to-private loan growth per step"
    )]
    pub private_loan_growth: Option<f64>,

    #[arg(
        long = "tga-target",
        value_name = "AMOUNT",
        help = "Treasury General Account target"
    )]
    pub tga_target: Option<f64>,
}

impl CliArgs {
    /// Build a ModelConfig from CLI arguments
    ///
    /// Starts from the config file if one was given, otherwise from the
    /// defaults, then applies every flag that was set.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the resulting
    /// configuration is invalid.
    pub fn to_model_config(&self) -> Result<ModelConfig, SimulationError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ModelConfig::default(),
        };

        if let Some(steps) = self.steps {
            config.steps = steps;
        }
        if let Some(gov_spending) = self.gov_spending {
            config.gov_spending = gov_spending;
        }
        if let Some(tax_rate) = self.tax_rate {
            config.tax_rate = tax_rate;
        }
        if let Some(loan_growth) = self.loan_growth {
            config.loan_growth = loan_growth;
        }
        if let Some(private_loan_growth) = self.private_loan_growth {
            config.private_loan_growth = private_loan_growth;
        }
        if let Some(tga_target) = self.tga_target {
            config.tga_target = tga_target;
        }

        config.validate()?;
        Ok(config)
    }
}
