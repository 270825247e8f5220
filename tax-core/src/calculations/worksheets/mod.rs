//! IRS worksheets that feed Form 1040.

pub mod capital_gains;
pub mod self_emp;
pub mod social_security;

pub use capital_gains::CapitalGainsWorksheet;
pub use self_emp::{SeWorksheet, SeWorksheetError, SeWorksheetResult};
pub use social_security::SocialSecurityWorksheet;
