use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilingStatus {
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
    HeadOfHousehold,
    QualifyingSurvivingSpouse,
}

impl FilingStatus {
    pub const ALL: [FilingStatus; 5] = [
        Self::Single,
        Self::MarriedFilingJointly,
        Self::MarriedFilingSeparately,
        Self::HeadOfHousehold,
        Self::QualifyingSurvivingSpouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
            Self::QualifyingSurvivingSpouse => "QSS",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
            Self::QualifyingSurvivingSpouse => "Qualifying Surviving Spouse",
        }
    }

    /// Accepts the short code (`MFJ`) or the snake-case name
    /// (`married_filing_jointly`), case-insensitively. `QW` and
    /// `qualifying_widow` are accepted as older spellings of `QSS`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "single" => Some(Self::Single),
            "mfj" | "married_filing_jointly" | "married_joint" => Some(Self::MarriedFilingJointly),
            "mfs" | "married_filing_separately" | "married_separate" => {
                Some(Self::MarriedFilingSeparately)
            }
            "hoh" | "head_of_household" => Some(Self::HeadOfHousehold),
            "qss" | "qw" | "qualifying_surviving_spouse" | "qualifying_widow" => {
                Some(Self::QualifyingSurvivingSpouse)
            }
            _ => None,
        }
    }

    /// Both spouses report on one return.
    pub fn is_joint(&self) -> bool {
        matches!(self, Self::MarriedFilingJointly)
    }

    /// Uses the married additional standard deduction amount.
    pub fn is_married(&self) -> bool {
        matches!(
            self,
            Self::MarriedFilingJointly
                | Self::MarriedFilingSeparately
                | Self::QualifyingSurvivingSpouse
        )
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ValidationError::InvalidFilingStatus(s.to_string()))
    }
}

impl TryFrom<String> for FilingStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FilingStatus> for String {
    fn from(value: FilingStatus) -> Self {
        value.as_str().to_string()
    }
}

/// One value per filing status.
///
/// Used for every table the tax law keys by filing status: bracket
/// schedules, standard deductions, phaseout thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByFilingStatus<T> {
    pub single: T,
    pub married_filing_jointly: T,
    pub married_filing_separately: T,
    pub head_of_household: T,
    pub qualifying_surviving_spouse: T,
}

impl<T: Clone> ByFilingStatus<T> {
    /// The same value for every status.
    pub fn uniform(value: T) -> Self {
        Self {
            single: value.clone(),
            married_filing_jointly: value.clone(),
            married_filing_separately: value.clone(),
            head_of_household: value.clone(),
            qualifying_surviving_spouse: value,
        }
    }

    /// Explicit values; the surviving spouse shares the joint value.
    pub fn new(
        single: T,
        married_filing_jointly: T,
        married_filing_separately: T,
        head_of_household: T,
    ) -> Self {
        Self {
            single,
            qualifying_surviving_spouse: married_filing_jointly.clone(),
            married_filing_jointly,
            married_filing_separately,
            head_of_household,
        }
    }

    /// Two-column tables: separate filers and heads of household use the
    /// single value, surviving spouses the joint value.
    pub fn single_joint(
        single: T,
        joint: T,
    ) -> Self {
        Self::new(single.clone(), joint, single.clone(), single)
    }
}

impl<T> ByFilingStatus<T> {
    pub fn get(
        &self,
        status: FilingStatus,
    ) -> &T {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => &self.married_filing_separately,
            FilingStatus::HeadOfHousehold => &self.head_of_household,
            FilingStatus::QualifyingSurvivingSpouse => &self.qualifying_surviving_spouse,
        }
    }

    pub fn get_mut(
        &mut self,
        status: FilingStatus,
    ) -> &mut T {
        match status {
            FilingStatus::Single => &mut self.single,
            FilingStatus::MarriedFilingJointly => &mut self.married_filing_jointly,
            FilingStatus::MarriedFilingSeparately => &mut self.married_filing_separately,
            FilingStatus::HeadOfHousehold => &mut self.head_of_household,
            FilingStatus::QualifyingSurvivingSpouse => &mut self.qualifying_surviving_spouse,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilingStatus, &T)> {
        FilingStatus::ALL.into_iter().map(move |s| (s, self.get(s)))
    }
}
