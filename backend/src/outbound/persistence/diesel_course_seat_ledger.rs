//! Diesel-backed seat ledger.
//!
//! The checked reservation is a single conditional
//! `UPDATE ... SET available_seats = available_seats - 1 WHERE id = $1 AND
//! available_seats > 0`, so the capacity check and the decrement are atomic
//! at the row level; no transaction or row lock is needed for the counter
//! alone.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::CourseId;
use crate::domain::ports::{CourseSeatLedger, CourseSeatLedgerError};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::courses;

/// Seat ledger backed by the courses table.
#[derive(Clone)]
pub struct DieselCourseSeatLedger {
    pool: DbPool,
}

impl DieselCourseSeatLedger {
    /// Create a ledger over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn course_exists(&self, course_id: CourseId) -> Result<bool, CourseSeatLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let found: Option<i32> = courses::table
            .find(course_id.as_uuid())
            .select(courses::capacity)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        Ok(found.is_some())
    }
}

fn map_pool(error: super::pool::PoolError) -> CourseSeatLedgerError {
    map_pool_error(error, CourseSeatLedgerError::connection)
}

fn map_diesel(error: diesel::result::Error) -> CourseSeatLedgerError {
    map_diesel_error(
        error,
        CourseSeatLedgerError::query,
        CourseSeatLedgerError::connection,
    )
}

#[async_trait]
impl CourseSeatLedger for DieselCourseSeatLedger {
    async fn reserve_seat(&self, course_id: CourseId) -> Result<(), CourseSeatLedgerError> {
        let updated = {
            let mut conn = self.pool.get().await.map_err(map_pool)?;
            diesel::update(
                courses::table
                    .filter(courses::id.eq(course_id.as_uuid()))
                    .filter(courses::available_seats.gt(0)),
            )
            .set(courses::available_seats.eq(courses::available_seats - 1))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?
        };

        if updated > 0 {
            return Ok(());
        }
        // Zero rows means either no seats or no course; look once to tell.
        if self.course_exists(course_id).await? {
            Err(CourseSeatLedgerError::Exhausted)
        } else {
            Err(CourseSeatLedgerError::CourseNotFound)
        }
    }

    async fn force_reserve_seat(
        &self,
        course_id: CourseId,
    ) -> Result<i32, CourseSeatLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        diesel::update(courses::table.filter(courses::id.eq(course_id.as_uuid())))
            .set(courses::available_seats.eq(courses::available_seats - 1))
            .returning(courses::available_seats)
            .get_result(&mut conn)
            .await
            .map_err(|error| match error {
                diesel::result::Error::NotFound => CourseSeatLedgerError::CourseNotFound,
                other => map_diesel(other),
            })
    }

    async fn release_seat(&self, course_id: CourseId) -> Result<(), CourseSeatLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let updated =
            diesel::update(courses::table.filter(courses::id.eq(course_id.as_uuid())))
                .set(courses::available_seats.eq(courses::available_seats + 1))
                .execute(&mut conn)
                .await
                .map_err(map_diesel)?;

        if updated == 0 {
            return Err(CourseSeatLedgerError::CourseNotFound);
        }
        Ok(())
    }
}
