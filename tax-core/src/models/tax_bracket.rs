use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One segment of a progressive rate schedule: income above `threshold`
/// (up to the next segment's threshold) is taxed at `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub threshold: Decimal,
    pub rate: Decimal,
}

impl TaxBracket {
    pub const fn new(
        threshold: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { threshold, rate }
    }
}

/// An ordered rate schedule. Thresholds ascend and the first one is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BracketSchedule(Vec<TaxBracket>);

impl BracketSchedule {
    /// Wraps `brackets` as given. Nothing is checked until
    /// [`validate`](Self::validate).
    pub fn new(brackets: Vec<TaxBracket>) -> Self {
        Self(brackets)
    }

    /// Builds a schedule from `(threshold, rate)` pairs.
    pub fn from_pairs(pairs: &[(Decimal, Decimal)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|&(threshold, rate)| TaxBracket::new(threshold, rate))
                .collect(),
        )
    }

    /// A single segment starting at zero.
    pub fn flat(rate: Decimal) -> Self {
        Self(vec![TaxBracket::new(Decimal::ZERO, rate)])
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks the structural invariants. Returns a human-readable reason on
    /// failure so callers can wrap it in their own error type.
    pub fn validate(&self) -> Result<(), String> {
        let Some(first) = self.0.first() else {
            return Err("schedule has no brackets".to_string());
        };
        if first.threshold != Decimal::ZERO {
            return Err(format!("first threshold must be 0, got {}", first.threshold));
        }
        for bracket in &self.0 {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(format!("rate {} is outside [0, 1]", bracket.rate));
            }
        }
        for pair in self.0.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(format!(
                    "thresholds must ascend, got {} after {}",
                    pair[1].threshold, pair[0].threshold
                ));
            }
        }
        Ok(())
    }

    /// Tax on `income` by marginal accumulation: every segment below
    /// `income` contributes `(segment top - segment threshold) * rate`.
    ///
    /// # Arguments
    ///
    /// * `income` - Taxable income; zero or less gives zero tax
    ///
    /// # Returns
    ///
    /// The unrounded tax. Callers round once when they report it.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::BracketSchedule;
    ///
    /// let schedule = BracketSchedule::from_pairs(&[
    ///     (dec!(0), dec!(0.10)),
    ///     (dec!(11925), dec!(0.12)),
    /// ]);
    ///
    /// // 11,925 * 10% + (20,000 - 11,925) * 12%
    /// assert_eq!(schedule.tax_on(dec!(20000)), dec!(2161.50));
    /// ```
    pub fn tax_on(
        &self,
        income: Decimal,
    ) -> Decimal {
        if income <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let mut tax = Decimal::ZERO;
        for (index, bracket) in self.0.iter().enumerate() {
            if income <= bracket.threshold {
                break;
            }
            let top = match self.0.get(index + 1) {
                Some(next) => income.min(next.threshold),
                None => income,
            };
            tax += (top - bracket.threshold) * bracket.rate;
        }
        tax
    }

    /// The rate applied to the next dollar above `income`.
    ///
    /// # Returns
    ///
    /// The rate of the highest bracket whose threshold is at or below
    /// `income`, or zero for an empty schedule.
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use tax_core::BracketSchedule;
    ///
    /// let schedule = BracketSchedule::from_pairs(&[
    ///     (dec!(0), dec!(0.10)),
    ///     (dec!(11925), dec!(0.12)),
    /// ]);
    ///
    /// assert_eq!(schedule.marginal_rate(dec!(11924.99)), dec!(0.10));
    /// assert_eq!(schedule.marginal_rate(dec!(11925)), dec!(0.12));
    /// ```
    pub fn marginal_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        self.0
            .iter()
            .rev()
            .find(|b| income >= b.threshold)
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }
}
