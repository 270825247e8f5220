use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{0}' is not a U.S. state or DC postal code")]
pub struct UnknownStateCode(pub String);

macro_rules! us_states {
    ($($code:ident => $name:literal,)+) => {
        /// The 50 states and the District of Columbia, by postal code.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum UsState {
            $($code,)+
        }

        impl UsState {
            /// Every jurisdiction, ordered by postal code.
            pub const ALL: &'static [UsState] = &[$(Self::$code,)+];

            pub fn code(&self) -> &'static str {
                match self {
                    $(Self::$code => stringify!($code),)+
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$code => $name,)+
                }
            }
        }
    };
}

us_states! {
    AK => "Alaska",
    AL => "Alabama",
    AR => "Arkansas",
    AZ => "Arizona",
    CA => "California",
    CO => "Colorado",
    CT => "Connecticut",
    DC => "District of Columbia",
    DE => "Delaware",
    FL => "Florida",
    GA => "Georgia",
    HI => "Hawaii",
    IA => "Iowa",
    ID => "Idaho",
    IL => "Illinois",
    IN => "Indiana",
    KS => "Kansas",
    KY => "Kentucky",
    LA => "Louisiana",
    MA => "Massachusetts",
    MD => "Maryland",
    ME => "Maine",
    MI => "Michigan",
    MN => "Minnesota",
    MO => "Missouri",
    MS => "Mississippi",
    MT => "Montana",
    NC => "North Carolina",
    ND => "North Dakota",
    NE => "Nebraska",
    NH => "New Hampshire",
    NJ => "New Jersey",
    NM => "New Mexico",
    NV => "Nevada",
    NY => "New York",
    OH => "Ohio",
    OK => "Oklahoma",
    OR => "Oregon",
    PA => "Pennsylvania",
    RI => "Rhode Island",
    SC => "South Carolina",
    SD => "South Dakota",
    TN => "Tennessee",
    TX => "Texas",
    UT => "Utah",
    VA => "Virginia",
    VT => "Vermont",
    WA => "Washington",
    WI => "Wisconsin",
    WV => "West Virginia",
    WY => "Wyoming",
}

impl UsState {
    /// States without a personal income tax on wages. New Hampshire and
    /// Tennessee once taxed interest and dividends only.
    pub const NO_INCOME_TAX: [UsState; 9] = [
        Self::AK,
        Self::FL,
        Self::NH,
        Self::NV,
        Self::SD,
        Self::TN,
        Self::TX,
        Self::WA,
        Self::WY,
    ];

    pub fn has_income_tax(&self) -> bool {
        !Self::NO_INCOME_TAX.contains(self)
    }

    /// Case-insensitive postal code, surrounding whitespace ignored.
    pub fn parse(s: &str) -> Option<Self> {
        let code = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for UsState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UsState {
    type Err = UnknownStateCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownStateCode(s.to_string()))
    }
}

impl TryFrom<String> for UsState {
    type Error = UnknownStateCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UsState> for String {
    fn from(value: UsState) -> Self {
        value.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn covers_fifty_states_and_dc() {
        assert_eq!(UsState::ALL.len(), 51);
    }

    #[test]
    fn all_is_sorted_by_code() {
        let mut sorted = UsState::ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, UsState::ALL);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(UsState::parse(" pa "), Some(UsState::PA));
        assert_eq!("Ny".parse::<UsState>(), Ok(UsState::NY));
    }

    #[test]
    fn unknown_code_is_reported() {
        assert_eq!("ZZ".parse::<UsState>(), Err(UnknownStateCode("ZZ".to_string())));
    }

    #[test]
    fn nine_states_have_no_income_tax() {
        let taxed = UsState::ALL.iter().filter(|s| s.has_income_tax()).count();

        assert_eq!(taxed, 42);
        assert!(!UsState::TX.has_income_tax());
    }
}
