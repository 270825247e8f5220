//! Tax returns stored as TOML.
//!
//! The file mirrors [`TaxReturn`] field for field; everything except
//! `tax_year` and `taxpayer.filing_status` may be omitted. Amounts are
//! integers or quoted decimals (`"1234.56"`).

use std::fs;
use std::path::{Path, PathBuf};

use tax_core::TaxReturn;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReturnFileError {
    #[error("cannot read return file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed return: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parses a return from TOML text. The federal result is never read from
/// input; it is attached by the engine.
pub fn parse_return(text: &str) -> Result<TaxReturn, ReturnFileError> {
    let tax_return: TaxReturn = toml::from_str(text)?;
    debug!(
        tax_year = tax_return.tax_year,
        filing_status = %tax_return.filing_status(),
        w2s = tax_return.income.w2s.len(),
        "parsed return"
    );
    Ok(tax_return)
}

pub fn load_return(path: &Path) -> Result<TaxReturn, ReturnFileError> {
    let text = fs::read_to_string(path).map_err(|source| ReturnFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_return(&text)
}
