use std::collections::HashMap;

use tracing::debug;

use crate::UsState;
use crate::calculator::StateTaxCalculator;

/// Builds a fresh calculator for one (state, year).
pub type CalculatorFactory = Box<dyn Fn() -> Box<dyn StateTaxCalculator> + Send + Sync>;

/// Registry of state calculators, keyed by state and tax year.
///
/// Typical lifetime:
/// 1. Create with [`StateRegistry::with_builtin_states`] (or
///    [`StateRegistry::new`] for an empty one in tests).
/// 2. Optionally `register` further calculators.
/// 3. Share it by reference with every [`StateTaxEngine`](crate::StateTaxEngine).
///
/// States without an income tax never need an entry; they count as
/// supported for every year.
pub struct StateRegistry {
    factories: HashMap<(UsState, i32), CalculatorFactory>,
}

impl StateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry holding every calculator this crate ships.
    pub fn with_builtin_states() -> Self {
        let mut registry = Self::new();
        crate::states::register_all(&mut registry);
        registry
    }

    /// Register a calculator factory.
    ///
    /// A factory already present for the same state and year is replaced.
    pub fn register<F>(
        &mut self,
        state: UsState,
        tax_year: i32,
        factory: F,
    ) where
        F: Fn() -> Box<dyn StateTaxCalculator> + Send + Sync + 'static,
    {
        if self
            .factories
            .insert((state, tax_year), Box::new(factory))
            .is_some()
        {
            debug!(%state, tax_year, "replaced state calculator");
        }
    }

    /// Builds a fresh calculator from the factory registered for the key.
    ///
    /// # Arguments
    ///
    /// * `state` - The jurisdiction
    /// * `tax_year` - The year whose rules the calculator applies
    ///
    /// # Returns
    ///
    /// A new calculator, or `None` when nothing is registered for the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tax_states::{StateRegistry, StateTaxCalculator, UsState};
    ///
    /// let registry = StateRegistry::with_builtin_states();
    ///
    /// let ohio = registry.get_calculator(UsState::OH, 2025).unwrap();
    /// assert_eq!(ohio.config().state, UsState::OH);
    /// assert!(registry.get_calculator(UsState::TX, 2025).is_none());
    /// ```
    pub fn get_calculator(
        &self,
        state: UsState,
        tax_year: i32,
    ) -> Option<Box<dyn StateTaxCalculator>> {
        self.factories
            .get(&(state, tax_year))
            .map(|factory| factory())
    }

    /// Like [`get_calculator`](Self::get_calculator), from a postal code.
    /// Unknown codes give `None`.
    pub fn get_calculator_by_code(
        &self,
        code: &str,
        tax_year: i32,
    ) -> Option<Box<dyn StateTaxCalculator>> {
        self.get_calculator(UsState::parse(code)?, tax_year)
    }

    /// A definitive answer exists: a calculator is registered, or the state
    /// has no income tax.
    pub fn is_supported(
        &self,
        state: UsState,
        tax_year: i32,
    ) -> bool {
        !state.has_income_tax() || self.factories.contains_key(&(state, tax_year))
    }

    /// Every supported state for `tax_year`, including those without an
    /// income tax, ordered by postal code.
    pub fn get_supported_states(
        &self,
        tax_year: i32,
    ) -> Vec<UsState> {
        let mut states: Vec<UsState> = self
            .factories
            .keys()
            .filter(|(_, year)| *year == tax_year)
            .map(|(state, _)| *state)
            .chain(UsState::NO_INCOME_TAX)
            .collect();
        states.sort_unstable();
        states.dedup();
        states
    }

    /// States with a calculator for `tax_year`, ordered by postal code.
    pub fn registered_states(
        &self,
        tax_year: i32,
    ) -> Vec<UsState> {
        let mut states: Vec<UsState> = self
            .factories
            .keys()
            .filter(|(_, year)| *year == tax_year)
            .map(|(state, _)| *state)
            .collect();
        states.sort_unstable();
        states
    }

    /// Number of registered `(state, year)` pairs. States without an
    /// income tax are never registered and do not count.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// `true` for a registry from [`new`](Self::new) before any
    /// [`register`](Self::register) call.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// tests
// ─────────────────────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::config::{StartingIncome, StateTaxConfig, TaxSchedule};

    static THREE_PERCENT: LazyLock<StateTaxConfig> = LazyLock::new(|| {
        StateTaxConfig::new(UsState::PA, 2025, TaxSchedule::Flat(dec!(0.03)), StartingIncome::FederalAgi)
    });

    static FOUR_PERCENT: LazyLock<StateTaxConfig> = LazyLock::new(|| {
        StateTaxConfig::new(UsState::PA, 2025, TaxSchedule::Flat(dec!(0.04)), StartingIncome::FederalAgi)
    });

    // ── stub calculator ─────────────────────────────────────────────────
    // Only `config` is implemented; the tests check routing, not arithmetic.
    struct Stub(&'static StateTaxConfig);

    impl StateTaxCalculator for Stub {
        fn config(&self) -> &StateTaxConfig {
            self.0
        }
    }

    fn three_percent() -> Box<dyn StateTaxCalculator> {
        Box::new(Stub(&THREE_PERCENT))
    }

    fn four_percent() -> Box<dyn StateTaxCalculator> {
        Box::new(Stub(&FOUR_PERCENT))
    }

    #[test]
    fn empty_registry_has_no_calculators() {
        let registry = StateRegistry::new();

        assert!(registry.is_empty());
        assert!(registry.get_calculator(UsState::PA, 2025).is_none());
        assert!(!registry.is_supported(UsState::PA, 2025));
    }

    #[test]
    fn registered_calculator_is_returned_for_its_year_only() {
        let mut registry = StateRegistry::new();
        registry.register(UsState::PA, 2025, three_percent);

        assert!(registry.get_calculator(UsState::PA, 2025).is_some());
        assert!(registry.get_calculator(UsState::PA, 2024).is_none());
        assert!(registry.is_supported(UsState::PA, 2025));
        assert!(!registry.is_supported(UsState::PA, 2024));
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut registry = StateRegistry::new();
        registry.register(UsState::PA, 2025, three_percent);
        registry.register(UsState::PA, 2025, four_percent);

        let calculator = registry.get_calculator(UsState::PA, 2025).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(calculator.config().schedule, TaxSchedule::Flat(dec!(0.04)));
    }

    #[test]
    fn lookup_by_code_is_case_insensitive() {
        let mut registry = StateRegistry::new();
        registry.register(UsState::PA, 2025, three_percent);

        assert!(registry.get_calculator_by_code("pa", 2025).is_some());
        assert!(registry.get_calculator_by_code("XX", 2025).is_none());
    }

    #[test]
    fn no_tax_states_are_always_supported() {
        let registry = StateRegistry::new();

        for state in UsState::NO_INCOME_TAX {
            assert!(registry.is_supported(state, 2025), "{state}");
            assert!(registry.is_supported(state, 1999), "{state}");
        }
    }

    #[test]
    fn supported_states_are_sorted_and_include_no_tax_states() {
        let mut registry = StateRegistry::new();
        registry.register(UsState::PA, 2025, three_percent);
        registry.register(UsState::CA, 2025, three_percent);
        registry.register(UsState::OH, 2024, three_percent);

        let states = registry.get_supported_states(2025);

        assert_eq!(
            states,
            vec![
                UsState::AK,
                UsState::CA,
                UsState::FL,
                UsState::NH,
                UsState::NV,
                UsState::PA,
                UsState::SD,
                UsState::TN,
                UsState::TX,
                UsState::WA,
                UsState::WY,
            ]
        );
        assert_eq!(registry.registered_states(2025), vec![UsState::CA, UsState::PA]);
    }

    #[test]
    fn builtin_registry_covers_every_taxed_state() {
        let registry = StateRegistry::with_builtin_states();

        let taxed: Vec<UsState> = UsState::ALL
            .iter()
            .copied()
            .filter(|s| s.has_income_tax())
            .collect();

        assert_eq!(registry.registered_states(2025), taxed);
        assert_eq!(registry.get_supported_states(2025), UsState::ALL);
    }
}
