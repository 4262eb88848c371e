//! Enrollment record: the (student, course) aggregate at the heart of the
//! engine.
//!
//! At most one enrollment may exist per (student, course) pair at any time.
//! The record moves through three states: absent, enrolled (grade pending),
//! and graded. Dropping hard-deletes the record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::course::CourseId;
use crate::domain::grade::Grade;
use crate::domain::student::StudentId;

/// Identifier of an enrollment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct EnrollmentId(Uuid);

impl EnrollmentId {
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

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One student's membership in one course.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// Set once at creation, immutable thereafter.
    pub enrolled_at: DateTime<Utc>,
    /// `None` while the grade is pending.
    pub grade: Option<Grade>,
}

impl Enrollment {
    /// Whether a grade has been recorded.
    pub fn is_graded(&self) -> bool {
        self.grade.is_some()
    }

    /// Display status used on rosters and enrollment listings.
    pub fn grade_status(&self) -> &'static str {
        if self.is_graded() { "Graded" } else { "Pending" }
    }
}
