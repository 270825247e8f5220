//! Calculation building blocks: money helpers, IRS worksheets and the
//! credit evaluators the federal engine drives.

pub mod common;
pub mod credits;
pub mod worksheets;

pub use credits::{CreditContext, CreditEvaluator};
pub use worksheets::{
    CapitalGainsWorksheet, SeWorksheet, SeWorksheetError, SeWorksheetResult,
    SocialSecurityWorksheet,
};
