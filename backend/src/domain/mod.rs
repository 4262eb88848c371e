//! Domain core of the enrollment and grading engine.
//!
//! Purpose: strongly typed entities (students, courses, enrollments, the
//! grade scale), the hexagonal ports, and the two services — the enrollment
//! engine (command side) and the academic record aggregator (read side).
//! Types are transport and storage agnostic; invariants live here.

pub mod actor;
pub mod course;
pub mod course_locks;
pub mod enrollment;
pub mod error;
pub mod grade;
pub mod ports;
pub mod student;

mod academic_records_service;
mod enrollment_service;

pub use self::academic_records_service::AcademicRecordService;
pub use self::actor::Actor;
pub use self::course::{CourseFilter, CourseId, CourseSummary};
pub use self::course_locks::CourseLockMap;
pub use self::enrollment::{Enrollment, EnrollmentId};
pub use self::enrollment_service::EnrollmentEngine;
pub use self::error::{Error, ErrorCode};
pub use self::grade::{Grade, InvalidGradeError, COURSE_CREDITS};
pub use self::student::{Student, StudentId};
