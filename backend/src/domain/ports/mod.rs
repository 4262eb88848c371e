//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`EnrollmentRepository`, `CourseSeatLedger`,
//! `CourseCatalogQuery`, `StudentDirectoryQuery`) are implemented by outbound
//! adapters; driving ports (`EnrollmentCommand`, `AcademicRecordsQuery`) are
//! implemented by the domain services and consumed by inbound adapters.

mod academic_records_query;
mod course_catalog;
mod course_seat_ledger;
mod enrollment_command;
mod enrollment_repository;
mod student_directory;

pub use academic_records_query::{
    AcademicRecordsQuery, CourseRosterView, GradeAnalyticsView, GradeDistributionView,
    RosterEntry, ScheduleView, TranscriptEntry, TranscriptView,
};
#[cfg(test)]
pub use course_catalog::MockCourseCatalogQuery;
pub use course_catalog::{CourseCatalogError, CourseCatalogQuery};
#[cfg(test)]
pub use course_seat_ledger::MockCourseSeatLedger;
pub use course_seat_ledger::{CourseSeatLedger, CourseSeatLedgerError};
pub use enrollment_command::{
    DropRequest, EnrollRequest, EnrollmentCommand, EnrollmentDetails, ForceDropRequest,
    ForceEnrollRequest, UpdateGradeRequest,
};
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use enrollment_repository::{EnrollmentRepository, EnrollmentRepositoryError};
#[cfg(test)]
pub use student_directory::MockStudentDirectoryQuery;
pub use student_directory::{StudentDirectoryError, StudentDirectoryQuery};
