//! Read-only port onto the student directory collaborator.

use async_trait::async_trait;

use crate::domain::{Student, StudentId};

/// Errors raised by directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentDirectoryError {
    /// Directory connection could not be established.
    #[error("student directory connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("student directory query failed: {message}")]
    Query { message: String },
}

impl StudentDirectoryError {
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

/// Port for resolving student profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectoryQuery: Send + Sync {
    /// Look up one student profile.
    async fn find_student(
        &self,
        student_id: StudentId,
    ) -> Result<Option<Student>, StudentDirectoryError>;
}
