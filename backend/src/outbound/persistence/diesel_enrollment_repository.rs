//! Diesel-backed enrollment store.
//!
//! The one-active-enrollment invariant is enforced by a unique index on
//! `(student_id, course_id)`; a unique violation on insert maps to the
//! duplicate port error so the engine can release the reserved seat.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{EnrollmentRepository, EnrollmentRepositoryError};
use crate::domain::{CourseId, Enrollment, EnrollmentId, Grade, StudentId};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{EnrollmentRow, NewEnrollmentRow};
use super::pool::DbPool;
use super::schema::enrollments;

/// Enrollment repository backed by the enrollments table.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: super::pool::PoolError) -> EnrollmentRepositoryError {
    map_pool_error(error, EnrollmentRepositoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> EnrollmentRepositoryError {
    map_diesel_error(
        error,
        EnrollmentRepositoryError::query,
        EnrollmentRepositoryError::connection,
    )
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn create(
        &self,
        student_id: StudentId,
        course_id: CourseId,
        enrolled_at: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = NewEnrollmentRow {
            id: Uuid::new_v4(),
            student_id: *student_id.as_uuid(),
            course_id: *course_id.as_uuid(),
            enrolled_at,
        };

        let inserted: EnrollmentRow = diesel::insert_into(enrollments::table)
            .values(&row)
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| {
                if is_unique_violation(&error) {
                    EnrollmentRepositoryError::Duplicate
                } else {
                    map_diesel(error)
                }
            })?;
        inserted.try_into()
    }

    async fn find_by_student_and_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<EnrollmentRow> = enrollments::table
            .filter(enrollments::student_id.eq(student_id.as_uuid()))
            .filter(enrollments::course_id.eq(course_id.as_uuid()))
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<EnrollmentRow> = enrollments::table
            .find(enrollment_id.as_uuid())
            .select(EnrollmentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::student_id.eq(student_id.as_uuid()))
            .order(enrollments::enrolled_at.asc())
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let rows: Vec<EnrollmentRow> = enrollments::table
            .filter(enrollments::course_id.eq(course_id.as_uuid()))
            .order(enrollments::enrolled_at.asc())
            .select(EnrollmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn set_grade(
        &self,
        enrollment_id: EnrollmentId,
        grade: Option<Grade>,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let stored = grade.map(|grade| grade.as_str().to_owned());
        let row: EnrollmentRow = diesel::update(enrollments::table.find(enrollment_id.as_uuid()))
            .set(enrollments::grade.eq(stored))
            .returning(EnrollmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| match error {
                diesel::result::Error::NotFound => EnrollmentRepositoryError::NotFound,
                other => map_diesel(other),
            })?;
        row.try_into()
    }

    async fn delete(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let deleted = diesel::delete(
            enrollments::table
                .filter(enrollments::student_id.eq(student_id.as_uuid()))
                .filter(enrollments::course_id.eq(course_id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel)?;

        if deleted == 0 {
            return Err(EnrollmentRepositoryError::NotFound);
        }
        Ok(())
    }
}
