//! Driving port for the enrollment engine.
//!
//! Inbound adapters call these use-cases; the engine implements them against
//! the seat ledger and the enrollment store as one unit of work per course.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    Actor, CourseId, CourseSummary, Enrollment, EnrollmentId, Error, Grade, Student, StudentId,
};

/// Enrollment record joined with the display fields adapters need.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollmentDetails {
    pub enrollment_id: EnrollmentId,
    pub student_id: StudentId,
    pub student_name: String,
    pub student_email: String,
    pub course_id: CourseId,
    pub course_code: String,
    pub course_title: String,
    pub semester: String,
    pub enrolled_at: DateTime<Utc>,
    pub grade: Option<Grade>,
}

impl EnrollmentDetails {
    /// Join an enrollment record with its student and course summaries.
    pub fn from_parts(
        enrollment: &Enrollment,
        student: &Student,
        course: &CourseSummary,
    ) -> Self {
        Self {
            enrollment_id: enrollment.id,
            student_id: enrollment.student_id,
            student_name: student.name.clone(),
            student_email: student.email.clone(),
            course_id: enrollment.course_id,
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            semester: course.semester.clone(),
            enrolled_at: enrollment.enrolled_at,
            grade: enrollment.grade,
        }
    }

    /// Display status derived from the grade field.
    pub fn grade_status(&self) -> &'static str {
        if self.grade.is_some() { "Graded" } else { "Pending" }
    }
}

/// Self-service enrollment intent.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrollRequest {
    pub actor: Actor,
    pub course_id: CourseId,
}

/// Self-service drop intent.
#[derive(Debug, Clone, PartialEq)]
pub struct DropRequest {
    pub actor: Actor,
    pub course_id: CourseId,
}

/// Administrative override enrollment intent.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceEnrollRequest {
    pub actor: Actor,
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// Audit annotation only; never behavioural.
    pub reason: Option<String>,
}

/// Administrative override drop intent.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceDropRequest {
    pub actor: Actor,
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// Audit annotation only; never behavioural.
    pub reason: Option<String>,
}

/// Grade update intent.
///
/// The grade travels as a raw string so the engine owns validation against
/// the scale; `None` reverts the enrollment to pending and must be accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateGradeRequest {
    pub actor: Actor,
    pub enrollment_id: EnrollmentId,
    pub grade: Option<String>,
}

/// Use-cases mutating enrollment state.
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Enroll the calling student, reserving a seat first.
    async fn enroll(&self, request: EnrollRequest) -> Result<EnrollmentDetails, Error>;

    /// Drop the calling student's enrollment and release the seat.
    async fn drop(&self, request: DropRequest) -> Result<(), Error>;

    /// Enroll any student past the capacity check (admin only).
    async fn force_enroll(&self, request: ForceEnrollRequest)
        -> Result<EnrollmentDetails, Error>;

    /// Drop any student's enrollment (admin only).
    async fn force_drop(&self, request: ForceDropRequest) -> Result<(), Error>;

    /// Record, replace, or clear a grade.
    async fn update_grade(&self, request: UpdateGradeRequest)
        -> Result<EnrollmentDetails, Error>;
}
