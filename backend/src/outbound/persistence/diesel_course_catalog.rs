//! Diesel-backed catalogue reads.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CourseCatalogError, CourseCatalogQuery};
use crate::domain::{CourseFilter, CourseId, CourseSummary};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::CourseRow;
use super::pool::DbPool;
use super::schema::courses;

/// Catalogue query adapter backed by the courses table.
#[derive(Clone)]
pub struct DieselCourseCatalog {
    pool: DbPool,
}

impl DieselCourseCatalog {
    /// Create a catalogue adapter over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: super::pool::PoolError) -> CourseCatalogError {
    map_pool_error(error, CourseCatalogError::connection)
}

fn map_diesel(error: diesel::result::Error) -> CourseCatalogError {
    map_diesel_error(
        error,
        CourseCatalogError::query,
        CourseCatalogError::connection,
    )
}

#[async_trait]
impl CourseCatalogQuery for DieselCourseCatalog {
    async fn find_course(
        &self,
        course_id: CourseId,
    ) -> Result<Option<CourseSummary>, CourseCatalogError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row: Option<CourseRow> = courses::table
            .find(course_id.as_uuid())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;
        Ok(row.map(Into::into))
    }

    async fn list_courses(
        &self,
        filter: CourseFilter,
    ) -> Result<Vec<CourseSummary>, CourseCatalogError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let mut query = courses::table.into_boxed();
        if let Some(semester) = filter.semester {
            query = query.filter(courses::semester.eq(semester));
        }
        if let Some(code) = filter.code {
            query = query.filter(courses::code.eq(code));
        }

        let rows: Vec<CourseRow> = query
            .order(courses::code.asc())
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
