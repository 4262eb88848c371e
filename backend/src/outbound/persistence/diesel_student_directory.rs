//! Diesel-backed student directory reads.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StudentDirectoryError, StudentDirectoryQuery};
use crate::domain::{Student, StudentId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::StudentRow;
use super::pool::DbPool;
use super::schema::students;

/// Directory query adapter backed by the students table.
#[derive(Clone)]
pub struct DieselStudentDirectory {
    pool: DbPool,
}

impl DieselStudentDirectory {
    /// Create a directory adapter over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: super::pool::PoolError) -> StudentDirectoryError {
    map_pool_error(error, StudentDirectoryError::connection)
}

fn map_diesel(error: diesel::result::Error) -> StudentDirectoryError {
    map_diesel_error(
        error,
        StudentDirectoryError::query,
        StudentDirectoryError::connection,
    )
}

#[async_trait]
impl StudentDirectoryQuery for DieselStudentDirectory {
    async fn find_student(
        &self,
        student_id: StudentId,
    ) -> Result<Option<Student>, StudentDirectoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<StudentRow> = students::table
            .find(student_id.as_uuid())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        Ok(row.map(Into::into))
    }
}
