use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::FilingStatus;

/// The requested tax year or one of its tables cannot be used.
///
/// These are never recoverable per return: they mean the process does not
/// support the year being asked for.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no tax year configuration registered for {0}")]
    UnsupportedTaxYear(i32),

    #[error("no {filing_status} bracket table configured for tax year {tax_year}")]
    MissingBrackets {
        tax_year: i32,
        filing_status: FilingStatus,
    },

    #[error("invalid {filing_status} bracket table for tax year {tax_year}: {reason}")]
    InvalidBrackets {
        tax_year: i32,
        filing_status: FilingStatus,
        reason: String,
    },

    #[error("invalid limits for tax year {tax_year}: {reason}")]
    InvalidLimits { tax_year: i32, reason: String },

    #[error("return is for tax year {return_year} but the engine is configured for {engine_year}")]
    TaxYearMismatch { engine_year: i32, return_year: i32 },
}

/// Input data rejected before any arithmetic runs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: String, value: Decimal },

    #[error("'{0}' is not a recognised filing status")]
    InvalidFilingStatus(String),

    #[error("filing status {filing_status} requires spouse information")]
    MissingSpouse { filing_status: FilingStatus },

    #[error("dependent #{index}: {reason}")]
    InvalidDependent { index: usize, reason: String },

    #[error("W-2 #{index}: {reason}")]
    InvalidW2 { index: usize, reason: String },
}

impl ValidationError {
    pub(crate) fn negative(
        field: impl Into<String>,
        value: Decimal,
    ) -> Self {
        Self::NegativeAmount {
            field: field.into(),
            value,
        }
    }
}

/// Failure of a complete federal calculation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("invalid return: {0}")]
    Validation(#[from] ValidationError),
}
