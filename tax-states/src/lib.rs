//! State income tax calculation on top of a completed federal return.
//!
//! Each taxable jurisdiction is a [`StateTaxConfig`] plus, where its law
//! needs it, a calculator overriding steps of the shared
//! [`StateTaxCalculator`] outline. Calculators are looked up through a
//! [`StateRegistry`] by the [`StateTaxEngine`].

pub mod breakdown;
pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
mod state_code;
pub mod states;

pub use breakdown::StateCalculationBreakdown;
pub use calculator::{
    StandardStateCalculator, StateContext, StateCredit, StateLines, StateTaxCalculator,
};
pub use config::{
    FederalTaxDeduction, RetirementExclusion, StartingIncome, StateStandardDeduction,
    StateTaxConfig, TaxSchedule,
};
pub use engine::StateTaxEngine;
pub use error::StateTaxError;
pub use registry::{CalculatorFactory, StateRegistry};
pub use state_code::{UnknownStateCode, UsState};
