//! Driving port for academic record queries.
//!
//! Pure read-side projections over the enrollment store and catalogue:
//! transcripts, GPA figures, grade distributions, and system-wide analytics.
//! No operation here mutates anything.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CourseFilter, CourseId, Error, Grade, StudentId};

use super::enrollment_command::EnrollmentDetails;

/// One transcript line: a course taken (or in progress) by the student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub course_code: String,
    pub course_title: String,
    pub semester: String,
    /// The letter grade, or `"In Progress"` while pending.
    pub grade: String,
    /// The assigned professor, or `"TBA"`.
    pub professor_name: String,
    pub credits: u32,
}

/// Full transcript for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptView {
    pub student_id: StudentId,
    pub student_name: String,
    pub email: String,
    /// Absent until at least one enrollment is graded.
    pub gpa: Option<f64>,
    pub total_credits: u32,
    pub completed_credits: u32,
    pub entries: Vec<TranscriptEntry>,
}

/// A student's current schedule: enrollments with running totals.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleView {
    pub student_id: StudentId,
    pub total_credits: u32,
    /// Absent until at least one enrollment is graded.
    pub gpa: Option<f64>,
    pub entries: Vec<TranscriptEntry>,
}

/// Per-letter tallies for one course or one filtered enrollment set.
///
/// Counts and percentages carry all thirteen letters, zero-initialised, so
/// consumers never need to distinguish "absent" from "zero". Percentages are
/// computed against the graded subset only, rounded half-up to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeDistributionView {
    pub course_id: CourseId,
    pub course_code: String,
    pub course_title: String,
    pub semester: String,
    pub counts: BTreeMap<Grade, u32>,
    pub percentages: BTreeMap<Grade, f64>,
    pub graded_count: u32,
    pub pending_count: u32,
    /// Mean grade points of the graded subset; 0.0 when nothing is graded.
    pub average_gpa: f64,
}

/// System-wide grade analytics over a filtered enrollment set.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeAnalyticsView {
    pub semester: Option<String>,
    pub course_code: Option<String>,
    pub counts: BTreeMap<Grade, u32>,
    pub percentages: BTreeMap<Grade, f64>,
    pub graded_count: u32,
    pub pending_count: u32,
    pub average_gpa: f64,
    /// Percentage of graded enrollments whose grade is not `F`.
    pub pass_rate: f64,
}

/// One row of a course roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub student_id: StudentId,
    pub student_name: String,
    pub student_email: String,
    pub grade: Option<Grade>,
    pub enrolled_at: DateTime<Utc>,
}

/// Course roster with seat figures and the grade distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRosterView {
    pub course_id: CourseId,
    pub course_code: String,
    pub course_title: String,
    pub semester: String,
    pub professor_name: String,
    pub capacity: i32,
    pub available_seats: i32,
    pub enrolled_count: u32,
    pub students: Vec<RosterEntry>,
    pub distribution: GradeDistributionView,
}

/// Use-cases reading academic records.
#[async_trait]
pub trait AcademicRecordsQuery: Send + Sync {
    /// Credit-weighted GPA, absent while nothing is graded.
    async fn gpa(&self, student_id: StudentId) -> Result<Option<f64>, Error>;

    /// Full transcript including in-progress courses.
    async fn transcript(&self, student_id: StudentId) -> Result<TranscriptView, Error>;

    /// Current schedule with running credit totals.
    async fn student_schedule(&self, student_id: StudentId) -> Result<ScheduleView, Error>;

    /// Grade distribution for one course.
    async fn course_grade_distribution(
        &self,
        course_id: CourseId,
    ) -> Result<GradeDistributionView, Error>;

    /// Roster for one course, including its distribution.
    async fn course_roster(&self, course_id: CourseId) -> Result<CourseRosterView, Error>;

    /// Distribution and pass rate over the filtered enrollment set.
    async fn grade_analytics(&self, filter: CourseFilter)
        -> Result<GradeAnalyticsView, Error>;

    /// Enrollments for one student, joined for display, insertion order.
    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<EnrollmentDetails>, Error>;

    /// Enrollments for one course, joined for display, insertion order.
    async fn list_for_course(&self, course_id: CourseId)
        -> Result<Vec<EnrollmentDetails>, Error>;
}
