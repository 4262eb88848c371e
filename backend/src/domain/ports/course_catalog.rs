//! Read-only port onto the course catalogue collaborator.

use async_trait::async_trait;

use crate::domain::{CourseFilter, CourseId, CourseSummary};

/// Errors raised by catalogue adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseCatalogError {
    /// Catalogue connection could not be established.
    #[error("course catalogue connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("course catalogue query failed: {message}")]
    Query { message: String },
}

impl CourseCatalogError {
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

/// Port for reading course summaries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalogQuery: Send + Sync {
    /// Look up one course.
    async fn find_course(
        &self,
        course_id: CourseId,
    ) -> Result<Option<CourseSummary>, CourseCatalogError>;

    /// List courses matching every populated filter field.
    async fn list_courses(
        &self,
        filter: CourseFilter,
    ) -> Result<Vec<CourseSummary>, CourseCatalogError>;
}
