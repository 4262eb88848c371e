//! Course read model and catalogue filters.
//!
//! Courses are owned by the catalogue collaborator. The enrollment core reads
//! these summaries and mutates only `available_seats`, through the seat
//! ledger port.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Identifier of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    /// Wrap an existing identifier.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A course as seen by the enrollment core.
///
/// `available_seats` may sit below zero after administrative force-enrolls;
/// a negative count is the audit signal that an override occurred. Under
/// unforced operation `capacity - available_seats` equals the number of
/// active enrollments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSummary {
    pub id: CourseId,
    /// Unique short code such as `CS101`.
    pub code: String,
    pub title: String,
    /// Term label, for example `Fall 2026`.
    pub semester: String,
    /// Total seats, fixed by the catalogue.
    pub capacity: i32,
    /// Seats still open; negative only after forced over-enrollment.
    pub available_seats: i32,
    /// Assigned professor, if any.
    pub professor_name: Option<String>,
}

impl CourseSummary {
    /// Number of seats currently taken.
    pub fn enrolled_count(&self) -> i32 {
        self.capacity - self.available_seats
    }

    /// Professor name for display, with the registrar's placeholder when the
    /// course has no assignment yet.
    pub fn professor_label(&self) -> String {
        self.professor_name
            .clone()
            .unwrap_or_else(|| "TBA".to_owned())
    }
}

/// Optional filters for catalogue listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Restrict to one term label.
    pub semester: Option<String>,
    /// Restrict to one course code.
    pub code: Option<String>,
}

impl CourseFilter {
    /// Whether the course matches every populated filter field.
    pub fn matches(&self, course: &CourseSummary) -> bool {
        self.semester
            .as_deref()
            .is_none_or(|semester| course.semester == semester)
            && self.code.as_deref().is_none_or(|code| course.code == code)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    fn course(semester: &str, code: &str) -> CourseSummary {
        CourseSummary {
            id: CourseId::new(Uuid::new_v4()),
            code: code.to_owned(),
            title: "Intro".to_owned(),
            semester: semester.to_owned(),
            capacity: 30,
            available_seats: 12,
            professor_name: None,
        }
    }

    #[rstest]
    fn enrolled_count_is_capacity_minus_available() {
        assert_eq!(course("Fall 2026", "CS101").enrolled_count(), 18);
    }

    #[rstest]
    fn professor_label_defaults_to_tba() {
        let mut summary = course("Fall 2026", "CS101");
        assert_eq!(summary.professor_label(), "TBA");
        summary.professor_name = Some("Dr. Hart".to_owned());
        assert_eq!(summary.professor_label(), "Dr. Hart");
    }

    #[rstest]
    #[case(None, None, true)]
    #[case(Some("Fall 2026"), None, true)]
    #[case(Some("Spring 2027"), None, false)]
    #[case(None, Some("CS101"), true)]
    #[case(Some("Fall 2026"), Some("MA201"), false)]
    fn filters_match_on_every_populated_field(
        #[case] semester: Option<&str>,
        #[case] code: Option<&str>,
        #[case] expected: bool,
    ) {
        let filter = CourseFilter {
            semester: semester.map(str::to_owned),
            code: code.map(str::to_owned),
        };
        assert_eq!(filter.matches(&course("Fall 2026", "CS101")), expected);
    }
}
