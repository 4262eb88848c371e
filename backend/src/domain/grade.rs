//! Letter-grade scale and grade-point mapping.
//!
//! The scale is fixed: thirteen letter grades from `A+` down to `F`, each
//! carrying a grade-point value used for GPA computation. Grade strings
//! outside the scale are rejected at the parsing boundary so the rest of the
//! domain only ever sees valid grades.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed credit weight of every course in the catalogue.
pub const COURSE_CREDITS: u32 = 3;

/// A letter grade on the institutional grading scale.
///
/// Ordering follows the scale from best (`A+`) to worst (`F`) so ordered
/// collections list grades the way a report would.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

/// Raised when a grade string is not on the scale.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid grade: {value}")]
pub struct InvalidGradeError {
    value: String,
}

impl InvalidGradeError {
    /// The rejected input, as received.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Grade {
    /// Every grade on the scale, best first.
    pub const ALL: [Self; 13] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::DMinus,
        Self::F,
    ];

    /// Grade-point value used for GPA weighting.
    ///
    /// `A+` and `A` both map to 4.0; every step below drops by 0.3 or 0.4
    /// down to `F` at 0.0.
    pub fn grade_points(self) -> f64 {
        match self {
            Self::APlus | Self::A => 4.0,
            Self::AMinus => 3.7,
            Self::BPlus => 3.3,
            Self::B => 3.0,
            Self::BMinus => 2.7,
            Self::CPlus => 2.3,
            Self::C => 2.0,
            Self::CMinus => 1.7,
            Self::DPlus => 1.3,
            Self::D => 1.0,
            Self::DMinus => 0.7,
            Self::F => 0.0,
        }
    }

    /// The letter as printed on transcripts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
        }
    }

    /// Whether the grade counts as passing (everything except `F`).
    pub fn is_passing(self) -> bool {
        !matches!(self, Self::F)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = InvalidGradeError;

    /// Parse a letter grade, ignoring case (`"a+"` is accepted as `A+`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|grade| grade.as_str() == normalised)
            .ok_or_else(|| InvalidGradeError {
                value: value.to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    //! Scale coverage: every letter maps to its documented point value and
    //! round-trips through parsing.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Grade::APlus, 4.0)]
    #[case(Grade::A, 4.0)]
    #[case(Grade::AMinus, 3.7)]
    #[case(Grade::BPlus, 3.3)]
    #[case(Grade::B, 3.0)]
    #[case(Grade::BMinus, 2.7)]
    #[case(Grade::CPlus, 2.3)]
    #[case(Grade::C, 2.0)]
    #[case(Grade::CMinus, 1.7)]
    #[case(Grade::DPlus, 1.3)]
    #[case(Grade::D, 1.0)]
    #[case(Grade::DMinus, 0.7)]
    #[case(Grade::F, 0.0)]
    fn grade_points_match_scale(#[case] grade: Grade, #[case] points: f64) {
        assert!((grade.grade_points() - points).abs() < f64::EPSILON);
    }

    #[rstest]
    fn every_letter_round_trips_through_parsing() {
        for grade in Grade::ALL {
            let parsed: Grade = grade.as_str().parse().expect("letter on the scale");
            assert_eq!(parsed, grade);
        }
    }

    #[rstest]
    #[case("a+", Grade::APlus)]
    #[case(" b- ", Grade::BMinus)]
    #[case("f", Grade::F)]
    fn parsing_ignores_case_and_whitespace(#[case] input: &str, #[case] expected: Grade) {
        assert_eq!(input.parse::<Grade>().expect("valid grade"), expected);
    }

    #[rstest]
    #[case("Z")]
    #[case("A++")]
    #[case("")]
    #[case("E")]
    fn off_scale_strings_are_rejected(#[case] input: &str) {
        let error = input.parse::<Grade>().expect_err("off the scale");
        assert_eq!(error.value(), input);
    }

    #[rstest]
    fn serialises_as_the_printed_letter() {
        let json = serde_json::to_string(&Grade::APlus).expect("serialise");
        assert_eq!(json, "\"A+\"");
        let back: Grade = serde_json::from_str("\"C-\"").expect("deserialise");
        assert_eq!(back, Grade::CMinus);
    }

    #[rstest]
    fn only_f_fails(#[values(Grade::APlus, Grade::C, Grade::DMinus)] passing: Grade) {
        assert!(passing.is_passing());
        assert!(!Grade::F.is_passing());
    }
}
