//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's type
//! requirements for queries and mutations.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::ports::EnrollmentRepositoryError;
use crate::domain::{
    CourseId, CourseSummary, Enrollment, EnrollmentId, Grade, Student, StudentId,
};

use super::schema::{courses, enrollments, students};

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub student_code: String,
    #[expect(dead_code, reason = "schema field read only for audit queries")]
    pub created_at: DateTime<Utc>,
}

impl From<StudentRow> for Student {
    fn from(row: StudentRow) -> Self {
        Self {
            id: StudentId::new(row.id),
            name: row.name,
            email: row.email,
            student_code: row.student_code,
        }
    }
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub semester: String,
    pub capacity: i32,
    pub available_seats: i32,
    pub professor_name: Option<String>,
}

impl From<CourseRow> for CourseSummary {
    fn from(row: CourseRow) -> Self {
        Self {
            id: CourseId::new(row.id),
            code: row.code,
            title: row.title,
            semester: row.semester,
            capacity: row.capacity,
            available_seats: row.available_seats,
            professor_name: row.professor_name,
        }
    }
}

/// Row struct for reading from the enrollments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EnrollmentRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub grade: Option<String>,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = EnrollmentRepositoryError;

    /// A grade string outside the scale can only appear through out-of-band
    /// writes; surface it as a query error rather than panicking.
    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        let grade = row
            .grade
            .as_deref()
            .map(Grade::from_str)
            .transpose()
            .map_err(|err| {
                EnrollmentRepositoryError::query(format!(
                    "stored grade for enrollment {} is off the scale: {err}",
                    row.id
                ))
            })?;
        Ok(Self {
            id: EnrollmentId::new(row.id),
            student_id: StudentId::new(row.student_id),
            course_id: CourseId::new(row.course_id),
            enrolled_at: row.enrolled_at,
            grade,
        })
    }
}

/// Insertable struct for creating new enrollment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}
