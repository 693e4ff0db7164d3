//! I/O module
//!
//! Handles configuration input and CSV output.
//!
//! # Components
//!
//! - `config_file` - JSON configuration loading
//! - `csv_format` - CSV serialization of simulation histories

pub mod config_file;
pub mod csv_format;

pub use config_file::{load_config, read_config};
pub use csv_format::{write_history_csv, write_results, OUTPUT_FILES};
