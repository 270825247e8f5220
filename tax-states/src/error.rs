use tax_core::{FilingStatus, ValidationError};
use thiserror::Error;

use crate::UsState;

/// Failure of a state calculation. An unsupported state or year is not an
/// error; the engine reports it as `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateTaxError {
    #[error("state calculation needs the federal result; run the federal engine first")]
    FederalNotCalculated,

    #[error("return is for tax year {return_year} but the {state} rules are for {config_year}")]
    TaxYearMismatch {
        state: UsState,
        config_year: i32,
        return_year: i32,
    },

    #[error("{state} has no {filing_status} bracket table")]
    MissingBrackets {
        state: UsState,
        filing_status: FilingStatus,
    },

    #[error("invalid return: {0}")]
    Validation(#[from] ValidationError),
}
