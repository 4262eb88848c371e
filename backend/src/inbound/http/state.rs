//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AcademicRecordsQuery, EnrollmentCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub enrollments: Arc<dyn EnrollmentCommand>,
    pub records: Arc<dyn AcademicRecordsQuery>,
}

impl HttpState {
    /// Bundle the command and query ports for handler injection.
    pub fn new(
        enrollments: Arc<dyn EnrollmentCommand>,
        records: Arc<dyn AcademicRecordsQuery>,
    ) -> Self {
        Self {
            enrollments,
            records,
        }
    }
}
