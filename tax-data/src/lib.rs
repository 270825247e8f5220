//! File formats and tooling around the tax engines: federal bracket tables
//! from CSV, tax returns from TOML, text reports and logging setup for the
//! `tax-calc` binary.

pub mod loader;
pub mod logging;
pub mod report;
pub mod return_file;

pub use loader::{BracketLoaderError, Schedule, TaxBracketLoader, TaxBracketRecord};
pub use return_file::{ReturnFileError, load_return, parse_return};
