use serde::{Deserialize, Serialize};

use super::FilingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Child,
    Stepchild,
    FosterChild,
    Grandchild,
    Sibling,
    Parent,
    Other,
}

impl Relationship {
    /// Relationships that can make a dependent a qualifying child.
    pub fn is_child_relationship(&self) -> bool {
        matches!(
            self,
            Self::Child | Self::Stepchild | Self::FosterChild | Self::Grandchild | Self::Sibling
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependent {
    pub name: String,
    /// Age at the end of the tax year.
    pub age: u32,
    pub relationship: Relationship,
    /// Months the dependent lived in the taxpayer's home during the year.
    #[serde(default = "full_year")]
    pub months_in_home: u32,
    #[serde(default)]
    pub full_time_student: bool,
    #[serde(default)]
    pub permanently_disabled: bool,
    /// Lived in the taxpayer's state of residence; some states only grant
    /// dependent exemptions for resident dependents.
    #[serde(default = "default_true")]
    pub resident: bool,
}

fn full_year() -> u32 {
    12
}

fn default_true() -> bool {
    true
}

impl Dependent {
    /// Lived with the taxpayer more than half the year.
    pub fn meets_residency_test(&self) -> bool {
        self.months_in_home > 6
    }

    /// Qualifying child for the child tax credit: a child relationship,
    /// under `age_limit` at year end, living at home more than half the year.
    pub fn is_ctc_qualifying_child(
        &self,
        age_limit: u32,
    ) -> bool {
        self.relationship.is_child_relationship()
            && self.age < age_limit
            && self.meets_residency_test()
    }

    /// Qualifying child for the earned income credit: under 19, under 24 and
    /// a full-time student, or permanently disabled at any age.
    pub fn is_eitc_qualifying_child(&self) -> bool {
        let age_test =
            self.age < 19 || (self.full_time_student && self.age < 24) || self.permanently_disabled;
        self.relationship.is_child_relationship() && age_test && self.meets_residency_test()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpouseInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub blind: bool,
}

impl SpouseInfo {
    pub fn is_65_or_older(&self) -> bool {
        self.age >= 65
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub filing_status: FilingStatus,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub blind: bool,
    #[serde(default)]
    pub spouse: Option<SpouseInfo>,
    #[serde(default)]
    pub dependents: Vec<Dependent>,
}

impl TaxpayerInfo {
    pub fn new(filing_status: FilingStatus) -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            filing_status,
            age: 0,
            blind: false,
            spouse: None,
            dependents: Vec::new(),
        }
    }

    pub fn is_65_or_older(&self) -> bool {
        self.age >= 65
    }

    /// The spouse when both report on this return.
    pub fn joint_spouse(&self) -> Option<&SpouseInfo> {
        if self.filing_status.is_joint() {
            self.spouse.as_ref()
        } else {
            None
        }
    }

    /// Number of 65-or-older and blind boxes checked on the return.
    pub fn additional_deduction_conditions(&self) -> u32 {
        let mut count = u32::from(self.is_65_or_older()) + u32::from(self.blind);
        if let Some(spouse) = self.joint_spouse() {
            count += u32::from(spouse.is_65_or_older()) + u32::from(spouse.blind);
        }
        count
    }

    /// People covered by the return: filer, joint spouse and dependents.
    pub fn household_size(&self) -> usize {
        1 + usize::from(self.joint_spouse().is_some()) + self.dependents.len()
    }

    /// Filer plus joint spouse.
    pub fn filer_count(&self) -> u32 {
        1 + u32::from(self.joint_spouse().is_some())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn child(age: u32) -> Dependent {
        Dependent {
            name: "Kid".to_string(),
            age,
            relationship: Relationship::Child,
            months_in_home: 12,
            full_time_student: false,
            permanently_disabled: false,
            resident: true,
        }
    }

    #[test]
    fn ctc_child_must_be_under_age_limit() {
        assert!(child(16).is_ctc_qualifying_child(17));
        assert!(!child(17).is_ctc_qualifying_child(17));
    }

    #[test]
    fn ctc_child_must_live_at_home_over_half_year() {
        let mut kid = child(5);
        kid.months_in_home = 6;

        assert!(!kid.is_ctc_qualifying_child(17));
    }

    #[test]
    fn parent_is_never_qualifying_child() {
        let mut parent = child(5);
        parent.relationship = Relationship::Parent;

        assert!(!parent.is_eitc_qualifying_child());
    }

    #[test]
    fn eitc_student_age_extension() {
        let mut student = child(22);
        assert!(!student.is_eitc_qualifying_child());

        student.full_time_student = true;
        assert!(student.is_eitc_qualifying_child());
    }

    #[test]
    fn conditions_count_spouse_only_on_joint_return() {
        let mut info = TaxpayerInfo::new(FilingStatus::MarriedFilingJointly);
        info.age = 70;
        info.spouse = Some(SpouseInfo {
            age: 66,
            blind: true,
            ..SpouseInfo::default()
        });
        assert_eq!(info.additional_deduction_conditions(), 3);

        info.filing_status = FilingStatus::MarriedFilingSeparately;
        assert_eq!(info.additional_deduction_conditions(), 1);
    }

    #[test]
    fn household_size_counts_joint_spouse_and_dependents() {
        let mut info = TaxpayerInfo::new(FilingStatus::MarriedFilingJointly);
        info.spouse = Some(SpouseInfo::default());
        info.dependents = vec![child(3), child(8)];

        assert_eq!(info.household_size(), 4);
        assert_eq!(info.filer_count(), 2);
    }
}
