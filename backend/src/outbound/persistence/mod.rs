//! Persistence adapters for the driven ports.
//!
//! PostgreSQL implementations use Diesel with async support through
//! `diesel-async` and `bb8` connection pooling. The adapters are thin: they
//! translate between Diesel rows and domain types and map database errors to
//! the port error enums; no enrollment policy lives here. The seat counter is
//! mutated with a single conditional `UPDATE` so the capacity check-and-act
//! is atomic at the row level.
//!
//! [`InMemoryRegistry`] implements the same four ports over a mutex-guarded
//! map for tests and databaseless runs.

mod diesel_course_catalog;
mod diesel_course_seat_ledger;
mod diesel_enrollment_repository;
mod diesel_student_directory;
mod error_mapping;
mod memory;
mod models;
mod pool;
mod schema;

pub use diesel_course_catalog::DieselCourseCatalog;
pub use diesel_course_seat_ledger::DieselCourseSeatLedger;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_student_directory::DieselStudentDirectory;
pub use memory::InMemoryRegistry;
pub use pool::{DbPool, PoolConfig, PoolError};
