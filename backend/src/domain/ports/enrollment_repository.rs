//! Port for durable enrollment storage.
//!
//! Adapters must enforce the uniqueness invariant: at most one active record
//! per (student, course) pair. The PostgreSQL adapter relies on a unique
//! constraint; the in-memory adapter checks under its own mutex.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{CourseId, Enrollment, EnrollmentId, Grade, StudentId};

/// Errors raised by enrollment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentRepositoryError {
    /// An active record already exists for the (student, course) pair.
    #[error("enrollment already exists for this student and course")]
    Duplicate,
    /// No record matched the given key.
    #[error("enrollment not found")]
    NotFound,
    /// Storage connection could not be established.
    #[error("enrollment store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("enrollment store query failed: {message}")]
    Query { message: String },
}

impl EnrollmentRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for writing and reading enrollment records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Create a pending enrollment dated `enrolled_at`.
    ///
    /// Fails with [`EnrollmentRepositoryError::Duplicate`] when an active
    /// record for the pair already exists.
    async fn create(
        &self,
        student_id: StudentId,
        course_id: CourseId,
        enrolled_at: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Look up the record for one (student, course) pair.
    async fn find_by_student_and_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// Look up one record by its identifier.
    async fn find_by_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError>;

    /// All records for a student, in insertion order.
    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    /// All records for a course, in insertion order.
    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError>;

    /// Record, replace, or clear (`None` = revert to pending) a grade.
    async fn set_grade(
        &self,
        enrollment_id: EnrollmentId,
        grade: Option<Grade>,
    ) -> Result<Enrollment, EnrollmentRepositoryError>;

    /// Hard-delete the record for one (student, course) pair.
    async fn delete(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<(), EnrollmentRepositoryError>;
}
