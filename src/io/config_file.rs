//! JSON configuration files
//!
//! A config file is a JSON object with any subset of the
//! [`ModelConfig`] fields; missing fields take their defaults and unknown
//! fields are rejected, so a misspelled parameter name fails loudly. An
//! `initial` that is missing or empty means the default starting balances;
//! a non-empty `initial` replaces them as a whole.
//!
//! ```json
//! {
//!   "steps": 240,
//!   "tax_rate": 0.25,
//!   "initial": { "Banks": { "Reserves": 500.0 } }
//! }
//! ```

use crate::config::ModelConfig;
use crate::types::SimulationError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse a config from any reader
pub fn read_config(reader: impl Read) -> Result<ModelConfig, SimulationError> {
    let config: ModelConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

/// Load and validate a config file
///
/// # Errors
///
/// - `Io` if the file cannot be opened
/// - `InvalidConfig` if the JSON is malformed, names unknown fields or holds
///   unusable values
pub fn load_config(path: &Path) -> Result<ModelConfig, SimulationError> {
    let file = File::open(path).map_err(|e| SimulationError::Io {
        message: format!("Failed to open config '{}': {}", path.display(), e),
    })?;
    let config = read_config(BufReader::new(file))?;
    tracing::info!(path = %path.display(), steps = config.steps, "loaded config");
    Ok(config)
}
