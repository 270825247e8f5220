use tax_core::TaxReturn;
use tracing::{debug, warn};

use crate::UsState;
use crate::breakdown::StateCalculationBreakdown;
use crate::error::StateTaxError;
use crate::registry::StateRegistry;

/// Dispatches a return to the right state calculator for one tax year.
///
/// The engine does no arithmetic of its own: it resolves the calculator and
/// delegates.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::{FederalTaxEngine, FilingStatus, TaxReturn, TaxpayerInfo, W2};
/// use tax_states::{StateRegistry, StateTaxEngine};
///
/// let mut tax_return = TaxReturn::new(2025, TaxpayerInfo::new(FilingStatus::Single));
/// tax_return.income.w2s.push(W2::new("Contoso", dec!(100000), dec!(0)));
/// FederalTaxEngine::for_year(2025)?.calculate_complete_return(&mut tax_return)?;
///
/// let registry = StateRegistry::with_builtin_states();
/// let engine = StateTaxEngine::new(&registry, 2025);
///
/// let pa = engine.calculate(&tax_return, "PA")?.unwrap();
/// assert_eq!(pa.tax_before_credits, dec!(3070.00));
/// assert!(engine.calculate(&tax_return, "TX")?.is_none());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy)]
pub struct StateTaxEngine<'r> {
    registry: &'r StateRegistry,
    tax_year: i32,
}

impl<'r> StateTaxEngine<'r> {
    /// A dispatcher over `registry` for one tax year.
    ///
    /// # Arguments
    ///
    /// * `registry` - Calculator factories to look states up in
    /// * `tax_year` - Year used for every lookup; returns from other years
    ///   are rejected by the calculator
    ///
    /// # Examples
    ///
    /// ```
    /// use tax_states::{StateRegistry, StateTaxEngine};
    ///
    /// let registry = StateRegistry::with_builtin_states();
    /// let engine = StateTaxEngine::new(&registry, 2025);
    ///
    /// assert!(engine.is_state_supported("ny"));
    /// assert!(!engine.has_income_tax("WA"));
    /// ```
    pub fn new(
        registry: &'r StateRegistry,
        tax_year: i32,
    ) -> Self {
        Self { registry, tax_year }
    }

    /// The year passed to [`new`](Self::new).
    pub fn tax_year(&self) -> i32 {
        self.tax_year
    }

    /// The state breakdown, or `None` when no calculation is available: an
    /// unknown code, a state without an income tax, or no calculator
    /// registered for this year.
    ///
    /// # Errors
    ///
    /// Whatever the state calculator reports; see
    /// [`StateTaxCalculator::calculate`](crate::StateTaxCalculator::calculate).
    pub fn calculate(
        &self,
        tax_return: &TaxReturn,
        state_code: &str,
    ) -> Result<Option<StateCalculationBreakdown>, StateTaxError> {
        let Some(state) = UsState::parse(state_code) else {
            warn!(state_code, "unknown state code, no state calculation");
            return Ok(None);
        };
        if !state.has_income_tax() {
            debug!(%state, "no state income tax");
            return Ok(None);
        }
        let Some(calculator) = self.registry.get_calculator(state, self.tax_year) else {
            warn!(%state, tax_year = self.tax_year, "no state calculator registered");
            return Ok(None);
        };

        calculator.calculate(tax_return).map(Some)
    }

    /// Runs the return's state of residence, if it has one.
    ///
    /// # Errors
    ///
    /// As for [`calculate`](Self::calculate).
    pub fn calculate_residence(
        &self,
        tax_return: &TaxReturn,
    ) -> Result<Option<StateCalculationBreakdown>, StateTaxError> {
        match tax_return.state_of_residence.as_deref() {
            Some(code) => self.calculate(tax_return, code),
            None => Ok(None),
        }
    }

    /// `false` for the no-tax states; unknown codes also give `false`.
    pub fn has_income_tax(
        &self,
        state_code: &str,
    ) -> bool {
        UsState::parse(state_code).is_some_and(|s| s.has_income_tax())
    }

    /// Ordered by postal code.
    pub fn get_no_income_tax_states(&self) -> Vec<UsState> {
        let mut states = UsState::NO_INCOME_TAX.to_vec();
        states.sort_unstable();
        states
    }

    /// `true` when a calculator is registered for this year or the state
    /// has no income tax. Unknown codes give `false`.
    pub fn is_state_supported(
        &self,
        state_code: &str,
    ) -> bool {
        UsState::parse(state_code).is_some_and(|s| self.registry.is_supported(s, self.tax_year))
    }

    /// See [`StateRegistry::get_supported_states`].
    pub fn get_supported_states(&self) -> Vec<UsState> {
        self.registry.get_supported_states(self.tax_year)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculator::StateTaxCalculator;
    use crate::calculator::test_support::single;
    use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};

    static CONFIG: LazyLock<StateTaxConfig> = LazyLock::new(|| {
        StateTaxConfig::new(UsState::OH, 2025, TaxSchedule::Flat(dec!(0.01)), StartingIncome::FederalAgi)
    });

    static CALLS: AtomicUsize = AtomicUsize::new(0);

    struct Counting;

    impl StateTaxCalculator for Counting {
        fn config(&self) -> &StateTaxConfig {
            &CONFIG
        }

        fn calculate(
            &self,
            _tax_return: &TaxReturn,
        ) -> Result<StateCalculationBreakdown, StateTaxError> {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Err(StateTaxError::FederalNotCalculated)
        }
    }

    fn registry() -> StateRegistry {
        let mut registry = StateRegistry::new();
        registry.register(UsState::OH, 2025, || -> Box<dyn StateTaxCalculator> { Box::new(Counting) });
        registry
    }

    #[test]
    fn delegates_to_registered_calculator() {
        let registry = registry();
        let engine = StateTaxEngine::new(&registry, 2025);
        let before = CALLS.load(Ordering::SeqCst);

        let result = engine.calculate(&single("OH", dec!(50000)), "oh");

        assert_eq!(result, Err(StateTaxError::FederalNotCalculated));
        assert_eq!(CALLS.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn unregistered_year_gives_none() {
        let registry = registry();
        let engine = StateTaxEngine::new(&registry, 2024);

        assert_eq!(engine.calculate(&single("OH", dec!(50000)), "OH"), Ok(None));
        assert!(!engine.is_state_supported("OH"));
    }

    #[test]
    fn unknown_code_gives_none() {
        let registry = registry();
        let engine = StateTaxEngine::new(&registry, 2025);

        assert_eq!(engine.calculate(&single("OH", dec!(50000)), "ZZ"), Ok(None));
        assert!(!engine.has_income_tax("ZZ"));
    }

    #[test]
    fn no_tax_states_short_circuit() {
        let registry = StateRegistry::new();
        let engine = StateTaxEngine::new(&registry, 2025);
        let tax_return = single("TX", dec!(80000));

        for state in engine.get_no_income_tax_states() {
            assert_eq!(engine.calculate(&tax_return, state.code()), Ok(None));
            assert!(engine.is_state_supported(state.code()));
            assert!(!engine.has_income_tax(state.code()));
        }
    }

    #[test]
    fn residence_without_state_gives_none() {
        let registry = registry();
        let engine = StateTaxEngine::new(&registry, 2025);
        let mut tax_return = single("OH", dec!(50000));
        tax_return.state_of_residence = None;

        assert_eq!(engine.calculate_residence(&tax_return), Ok(None));
    }
}
