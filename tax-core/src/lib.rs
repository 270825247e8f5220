//! Federal individual income tax computation.
//!
//! [`FederalTaxEngine`] turns a [`TaxReturn`] into a line-by-line
//! [`FederalCalculation`] using the immutable [`TaxYearConfig`] for the
//! return's year. Nothing here performs I/O; loading returns and bracket
//! tables from files is the job of the `tax-data` crate.

pub mod calculations;
pub mod error;
pub mod federal;
pub mod models;
mod tax_years;

pub use error::{ConfigError, TaxError, ValidationError};
pub use federal::FederalTaxEngine;
pub use models::*;
pub use tax_years::SUPPORTED_TAX_YEARS;
