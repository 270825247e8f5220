use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::calculations::common::money;
use tax_core::{BracketSchedule, ByFilingStatus, ConfigError, FilingStatus, TaxBracket, TaxYearConfig};
use thiserror::Error;
use tracing::{debug, info};

/// Reasons a bracket file cannot replace the built-in schedules.
#[derive(Debug, Error, PartialEq)]
pub enum BracketLoaderError {
    #[error("Unreadable bracket CSV: {0}")]
    CsvParse(String),

    #[error("Unknown schedule code '{0}' (expected X, Y-1, Y-2 or Z)")]
    InvalidSchedule(String),

    #[error("No bracket rows for tax year {0}")]
    NoRecordsForYear(i32),

    #[error("Schedule {schedule} missing for tax year {tax_year}")]
    MissingSchedule { tax_year: i32, schedule: Schedule },

    #[error("Schedule {schedule}: bracket starts at {found}, expected {expected}")]
    Discontinuous {
        schedule: Schedule,
        expected: Decimal,
        found: Decimal,
    },

    #[error("Schedule {schedule}: only the top bracket may be open-ended (row at {min_income})")]
    OpenEndedBeforeTop {
        schedule: Schedule,
        min_income: Decimal,
    },

    #[error("Schedule {schedule}: top bracket has a maximum of {max_income}")]
    BoundedTop {
        schedule: Schedule,
        max_income: Decimal,
    },

    #[error("Schedule {schedule}: base tax at {min_income} is {found}, brackets below give {expected}")]
    BaseTaxMismatch {
        schedule: Schedule,
        min_income: Decimal,
        expected: Decimal,
        found: Decimal,
    },

    #[error("Loaded brackets rejected: {0}")]
    Config(#[from] ConfigError),
}

impl From<csv::Error> for BracketLoaderError {
    fn from(err: csv::Error) -> Self {
        Self::CsvParse(err.to_string())
    }
}

/// IRS rate schedule designations.
///
/// - Schedule X → Single
/// - Schedule Y-1 → Married Filing Jointly and Qualifying Surviving Spouse
/// - Schedule Y-2 → Married Filing Separately
/// - Schedule Z → Head of Household
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Schedule {
    X,
    Y1,
    Y2,
    Z,
}

impl Schedule {
    pub fn parse(code: &str) -> Result<Self, BracketLoaderError> {
        match code.trim() {
            "X" => Ok(Self::X),
            "Y-1" => Ok(Self::Y1),
            "Y-2" => Ok(Self::Y2),
            "Z" => Ok(Self::Z),
            other => Err(BracketLoaderError::InvalidSchedule(other.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y1 => "Y-1",
            Self::Y2 => "Y-2",
            Self::Z => "Z",
        }
    }

    pub fn filing_statuses(&self) -> &'static [FilingStatus] {
        match self {
            Self::X => &[FilingStatus::Single],
            Self::Y1 => &[
                FilingStatus::MarriedFilingJointly,
                FilingStatus::QualifyingSurvivingSpouse,
            ],
            Self::Y2 => &[FilingStatus::MarriedFilingSeparately],
            Self::Z => &[FilingStatus::HeadOfHousehold],
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One bracket row, with columns
/// `tax_year,schedule,min_income,max_income,base_tax,rate`.
///
/// An empty `max_income` marks the open-ended top bracket. `base_tax` is
/// the tax owed on exactly `min_income`, as printed in the IRS tables,
/// and `rate` is a fraction (`0.22`, not `22`).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub tax_year: i32,
    pub schedule: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

/// Blank cells read as `None`.
fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let cell = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(None);
    }
    cell.parse::<Decimal>()
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// Loader for federal rate schedules published as CSV.
///
/// Rows are grouped by schedule code and checked against each other (every
/// bracket starts where the previous one ended and its base tax matches the
/// brackets below it) before they replace the built-in tables of a
/// [`TaxYearConfig`].
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Reads every row of a headed CSV. Nothing is checked beyond column
    /// types; see [`Self::build`].
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, BracketLoaderError> {
        let records = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader)
            .deserialize::<TaxBracketRecord>()
            .collect::<Result<Vec<_>, _>>()?;

        debug!(rows = records.len(), "parsed bracket CSV");
        Ok(records)
    }

    /// Builds one schedule per filing status from the rows for `tax_year`.
    /// Rows for other years are ignored; Y-1 serves both joint filers and
    /// surviving spouses.
    pub fn build(
        records: &[TaxBracketRecord],
        tax_year: i32,
    ) -> Result<ByFilingStatus<BracketSchedule>, BracketLoaderError> {
        let mut groups: BTreeMap<Schedule, Vec<&TaxBracketRecord>> = BTreeMap::new();
        for record in records.iter().filter(|r| r.tax_year == tax_year) {
            let schedule = Schedule::parse(&record.schedule)?;
            groups.entry(schedule).or_default().push(record);
        }
        if groups.is_empty() {
            return Err(BracketLoaderError::NoRecordsForYear(tax_year));
        }

        let mut table = |schedule: Schedule| -> Result<BracketSchedule, BracketLoaderError> {
            let mut rows = groups
                .remove(&schedule)
                .ok_or(BracketLoaderError::MissingSchedule { tax_year, schedule })?;
            rows.sort_by_key(|r| r.min_income);
            schedule_from_rows(schedule, &rows)
        };

        let single = table(Schedule::X)?;
        let joint = table(Schedule::Y1)?;
        let separate = table(Schedule::Y2)?;
        let head_of_household = table(Schedule::Z)?;

        Ok(ByFilingStatus::new(single, joint, separate, head_of_household))
    }

    /// A copy of `base` whose federal schedules come from `records`.
    pub fn apply(
        base: &TaxYearConfig,
        records: &[TaxBracketRecord],
    ) -> Result<TaxYearConfig, BracketLoaderError> {
        let brackets = Self::build(records, base.tax_year)?;
        let config = base.with_brackets(brackets)?;
        info!(tax_year = base.tax_year, "federal brackets replaced from CSV");
        Ok(config)
    }
}

fn schedule_from_rows(
    schedule: Schedule,
    rows: &[&TaxBracketRecord],
) -> Result<BracketSchedule, BracketLoaderError> {
    let mut brackets = Vec::with_capacity(rows.len());
    let mut expected_min = Decimal::ZERO;
    let mut tax_below = Decimal::ZERO;

    for (index, row) in rows.iter().enumerate() {
        let is_top = index + 1 == rows.len();
        if row.min_income != expected_min {
            return Err(BracketLoaderError::Discontinuous {
                schedule,
                expected: expected_min,
                found: row.min_income,
            });
        }
        if money(row.base_tax) != money(tax_below) {
            return Err(BracketLoaderError::BaseTaxMismatch {
                schedule,
                min_income: row.min_income,
                expected: money(tax_below),
                found: row.base_tax,
            });
        }
        brackets.push(TaxBracket::new(row.min_income, row.rate));

        match (row.max_income, is_top) {
            (Some(max_income), false) => {
                tax_below += (max_income - row.min_income) * row.rate;
                expected_min = max_income;
            }
            (None, true) => {}
            (None, false) => {
                return Err(BracketLoaderError::OpenEndedBeforeTop {
                    schedule,
                    min_income: row.min_income,
                });
            }
            (Some(max_income), true) => {
                return Err(BracketLoaderError::BoundedTop {
                    schedule,
                    max_income,
                });
            }
        }
    }

    Ok(BracketSchedule::new(brackets))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = include_str!("../test-data/tax_brackets_2025.csv");

    const HEADER: &str = "tax_year,schedule,min_income,max_income,base_tax,rate\n";

    fn records() -> Vec<TaxBracketRecord> {
        TaxBracketLoader::parse(TEST_CSV.as_bytes()).unwrap()
    }

    /// The full file with `from` replaced by `to` on one line.
    fn edited(
        from: &str,
        to: &str,
    ) -> Vec<TaxBracketRecord> {
        let csv = TEST_CSV.replacen(from, to, 1);
        TaxBracketLoader::parse(csv.as_bytes()).unwrap()
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn test_parse_reads_one_row() {
        let csv = format!("{HEADER}2025,Y-2,48475,103350,5578.50,0.22\n");

        let rows = TaxBracketLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(
            rows,
            vec![TaxBracketRecord {
                tax_year: 2025,
                schedule: "Y-2".to_string(),
                min_income: dec!(48475),
                max_income: Some(dec!(103350)),
                base_tax: dec!(5578.50),
                rate: dec!(0.22),
            }]
        );
    }

    #[test]
    fn test_parse_blank_max_is_open_ended() {
        let csv = format!("{HEADER}2025, Z , 626350 ,  , 187031.50 , 0.37\n");

        let rows = TaxBracketLoader::parse(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].schedule, "Z");
        assert_eq!(rows[0].max_income, None);
        assert_eq!(rows[0].rate, dec!(0.37));
    }

    #[test]
    fn test_parse_sample_file_has_seven_rows_per_schedule() {
        let rows = records();

        let mut per_schedule = BTreeMap::new();
        for row in &rows {
            *per_schedule.entry(row.schedule.as_str()).or_insert(0) += 1;
        }

        assert_eq!(
            per_schedule.into_iter().collect::<Vec<_>>(),
            vec![("X", 7), ("Y-1", 7), ("Y-2", 7), ("Z", 7)]
        );
    }

    #[test]
    fn test_parse_short_header_fails() {
        let csv = "tax_year,schedule,rate\n2025,X,0.10\n";

        let err = TaxBracketLoader::parse(csv.as_bytes()).unwrap_err();

        assert!(
            matches!(&err, BracketLoaderError::CsvParse(msg) if msg.contains("missing field")),
            "{err:?}"
        );
    }

    #[test]
    fn test_parse_non_numeric_rate_fails() {
        let csv = format!("{HEADER}2025,X,0,11925,0,ten percent\n");

        assert!(matches!(
            TaxBracketLoader::parse(csv.as_bytes()),
            Err(BracketLoaderError::CsvParse(_))
        ));
    }

    #[test]
    fn test_parse_header_only() {
        assert_eq!(TaxBracketLoader::parse(HEADER.as_bytes()), Ok(vec![]));
    }

    // =========================================================================
    // Schedule codes
    // =========================================================================

    #[test]
    fn test_schedule_codes_map_to_filing_statuses() {
        assert_eq!(
            Schedule::parse("X").unwrap().filing_statuses(),
            &[FilingStatus::Single]
        );
        assert_eq!(
            Schedule::parse("Y-1").unwrap().filing_statuses(),
            &[
                FilingStatus::MarriedFilingJointly,
                FilingStatus::QualifyingSurvivingSpouse
            ]
        );
        assert_eq!(
            Schedule::parse("Y-2").unwrap().filing_statuses(),
            &[FilingStatus::MarriedFilingSeparately]
        );
        assert_eq!(
            Schedule::parse(" Z ").unwrap().filing_statuses(),
            &[FilingStatus::HeadOfHousehold]
        );
    }

    #[test]
    fn test_schedule_invalid_code() {
        assert_eq!(
            Schedule::parse("INVALID"),
            Err(BracketLoaderError::InvalidSchedule("INVALID".to_string()))
        );
    }

    // =========================================================================
    // Building schedules
    // =========================================================================

    #[test]
    fn test_build_matches_builtin_2025_tables() {
        let builtin = TaxYearConfig::for_year(2025).unwrap();

        let brackets = TaxBracketLoader::build(&records(), 2025).unwrap();

        assert_eq!(brackets, builtin.brackets);
    }

    #[test]
    fn test_build_surviving_spouse_uses_y1() {
        let brackets = TaxBracketLoader::build(&records(), 2025).unwrap();

        assert_eq!(
            brackets.qualifying_surviving_spouse,
            brackets.married_filing_jointly
        );
        assert_eq!(
            brackets.married_filing_separately.brackets()[6],
            TaxBracket::new(dec!(375800), dec!(0.37))
        );
    }

    #[test]
    fn test_build_row_order_does_not_matter() {
        let mut shuffled = records();
        shuffled.reverse();

        let brackets = TaxBracketLoader::build(&shuffled, 2025).unwrap();

        assert_eq!(brackets, TaxBracketLoader::build(&records(), 2025).unwrap());
    }

    #[test]
    fn test_build_wrong_year() {
        let result = TaxBracketLoader::build(&records(), 2024);

        assert_eq!(result, Err(BracketLoaderError::NoRecordsForYear(2024)));
    }

    #[test]
    fn test_build_missing_schedule() {
        let without_z: Vec<_> = records().into_iter().filter(|r| r.schedule != "Z").collect();

        let result = TaxBracketLoader::build(&without_z, 2025);

        assert_eq!(
            result,
            Err(BracketLoaderError::MissingSchedule {
                tax_year: 2025,
                schedule: Schedule::Z,
            })
        );
    }

    #[test]
    fn test_build_gap_between_brackets() {
        let records = edited("2025,X,11925,48475", "2025,X,12000,48475");

        let result = TaxBracketLoader::build(&records, 2025);

        assert_eq!(
            result,
            Err(BracketLoaderError::Discontinuous {
                schedule: Schedule::X,
                expected: dec!(11925),
                found: dec!(12000),
            })
        );
    }

    #[test]
    fn test_build_base_tax_must_agree() {
        let records = edited("2025,Z,17000,64850,1700.00", "2025,Z,17000,64850,1750.00");

        let result = TaxBracketLoader::build(&records, 2025);

        assert_eq!(
            result,
            Err(BracketLoaderError::BaseTaxMismatch {
                schedule: Schedule::Z,
                min_income: dec!(17000),
                expected: dec!(1700.00),
                found: dec!(1750.00),
            })
        );
    }

    #[test]
    fn test_build_top_bracket_must_be_open() {
        let records = edited("2025,Y-2,375800,,", "2025,Y-2,375800,500000,");

        let result = TaxBracketLoader::build(&records, 2025);

        assert_eq!(
            result,
            Err(BracketLoaderError::BoundedTop {
                schedule: Schedule::Y2,
                max_income: dec!(500000),
            })
        );
    }

    #[test]
    fn test_build_open_bracket_in_the_middle() {
        let records = edited("2025,Y-1,23850,96950,", "2025,Y-1,23850,,");

        let result = TaxBracketLoader::build(&records, 2025);

        assert_eq!(
            result,
            Err(BracketLoaderError::OpenEndedBeforeTop {
                schedule: Schedule::Y1,
                min_income: dec!(23850),
            })
        );
    }

    // =========================================================================
    // Applying to a tax year
    // =========================================================================

    #[test]
    fn test_apply_replaces_only_brackets() {
        let base = TaxYearConfig::for_year(2025).unwrap();
        let records = edited("2025,X,626350,,188769.75,0.37", "2025,X,626350,,188769.75,0.40");

        let config = TaxBracketLoader::apply(base, &records).unwrap();

        assert_eq!(config.brackets.single.brackets()[6].rate, dec!(0.40));
        assert_eq!(config.standard_deduction, base.standard_deduction);
        assert_eq!(config.tax_year, 2025);
    }

    #[test]
    fn test_apply_rejects_rate_above_one() {
        let base = TaxYearConfig::for_year(2025).unwrap();
        let records = edited("2025,X,626350,,188769.75,0.37", "2025,X,626350,,188769.75,1.37");

        let result = TaxBracketLoader::apply(base, &records);

        assert!(
            matches!(
                result,
                Err(BracketLoaderError::Config(ConfigError::InvalidBrackets {
                    filing_status: FilingStatus::Single,
                    ..
                }))
            ),
            "got: {result:?}"
        );
    }
}
