//! Port for the per-course seat counter.
//!
//! The checked and forced reservation paths are deliberately separate:
//! student self-service is capacity-safe, administrative override bypasses
//! the check and may drive the count negative. Release is never clamped to
//! capacity; a count above capacity signals a data inconsistency upstream
//! rather than an error here.

use async_trait::async_trait;

use crate::domain::CourseId;

/// Errors raised by seat ledger adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseSeatLedgerError {
    /// The course has no remaining seats (checked path only).
    #[error("course is full, no available seats")]
    Exhausted,
    /// The course does not exist.
    #[error("course not found")]
    CourseNotFound,
    /// Storage connection could not be established.
    #[error("seat ledger connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("seat ledger query failed: {message}")]
    Query { message: String },
}

impl CourseSeatLedgerError {
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

/// Port for atomic seat reservation and release.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseSeatLedger: Send + Sync {
    /// Take one seat only if at least one is available.
    ///
    /// The check and the decrement must be a single atomic step in the
    /// adapter (conditional UPDATE, or a decrement under one mutex).
    async fn reserve_seat(&self, course_id: CourseId) -> Result<(), CourseSeatLedgerError>;

    /// Take one seat unconditionally; the count may go negative.
    ///
    /// Returns the seat count after the decrement so override paths can log
    /// the over-enrollment depth.
    async fn force_reserve_seat(&self, course_id: CourseId)
        -> Result<i32, CourseSeatLedgerError>;

    /// Give one seat back unconditionally, never clamped to capacity.
    async fn release_seat(&self, course_id: CourseId) -> Result<(), CourseSeatLedgerError>;
}
