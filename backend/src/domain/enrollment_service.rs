//! Enrollment engine: the command side of the enrollment core.
//!
//! Each mutating operation runs as one unit of work under a per-course lock
//! so the check–reserve–create (and delete–release) sequences cannot be
//! interleaved by a competing request for the same course. Unforced
//! enrollment can therefore never drive a seat count negative; the forced
//! paths may, and the negative count records the overage.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::course_locks::CourseLockMap;
use crate::domain::ports::{
    CourseCatalogError, CourseCatalogQuery, CourseSeatLedger, CourseSeatLedgerError,
    DropRequest, EnrollRequest, EnrollmentCommand, EnrollmentDetails, EnrollmentRepository,
    EnrollmentRepositoryError, ForceDropRequest, ForceEnrollRequest, StudentDirectoryError,
    StudentDirectoryQuery, UpdateGradeRequest,
};
use crate::domain::{CourseId, CourseSummary, Enrollment, Error, Grade, Student, StudentId};

fn map_repository_error(error: EnrollmentRepositoryError) -> Error {
    match error {
        EnrollmentRepositoryError::Duplicate => {
            Error::duplicate_enrollment("student is already enrolled in this course")
        }
        EnrollmentRepositoryError::NotFound => Error::not_found("enrollment not found"),
        EnrollmentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enrollment store unavailable: {message}"))
        }
        EnrollmentRepositoryError::Query { message } => {
            Error::internal(format!("enrollment store error: {message}"))
        }
    }
}

fn map_ledger_error(error: CourseSeatLedgerError) -> Error {
    match error {
        CourseSeatLedgerError::Exhausted => {
            Error::capacity_exhausted("course is full, no available seats")
        }
        CourseSeatLedgerError::CourseNotFound => Error::not_found("course not found"),
        CourseSeatLedgerError::Connection { message } => {
            Error::service_unavailable(format!("seat ledger unavailable: {message}"))
        }
        CourseSeatLedgerError::Query { message } => {
            Error::internal(format!("seat ledger error: {message}"))
        }
    }
}

fn map_catalog_error(error: CourseCatalogError) -> Error {
    match error {
        CourseCatalogError::Connection { message } => {
            Error::service_unavailable(format!("course catalogue unavailable: {message}"))
        }
        CourseCatalogError::Query { message } => {
            Error::internal(format!("course catalogue error: {message}"))
        }
    }
}

fn map_directory_error(error: StudentDirectoryError) -> Error {
    match error {
        StudentDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("student directory unavailable: {message}"))
        }
        StudentDirectoryError::Query { message } => {
            Error::internal(format!("student directory error: {message}"))
        }
    }
}

/// Engine implementing the enrollment command port.
pub struct EnrollmentEngine<L, E, C, S> {
    ledger: Arc<L>,
    enrollments: Arc<E>,
    catalog: Arc<C>,
    directory: Arc<S>,
    locks: CourseLockMap,
}

impl<L, E, C, S> EnrollmentEngine<L, E, C, S> {
    /// Create a new engine over the given driven ports.
    pub fn new(ledger: Arc<L>, enrollments: Arc<E>, catalog: Arc<C>, directory: Arc<S>) -> Self {
        Self {
            ledger,
            enrollments,
            catalog,
            directory,
            locks: CourseLockMap::new(),
        }
    }
}

impl<L, E, C, S> EnrollmentEngine<L, E, C, S>
where
    L: CourseSeatLedger,
    E: EnrollmentRepository,
    C: CourseCatalogQuery,
    S: StudentDirectoryQuery,
{
    async fn require_student_profile(&self, student_id: StudentId) -> Result<Student, Error> {
        self.directory
            .find_student(student_id)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| Error::not_found(format!("student {student_id} not found")))
    }

    async fn require_course(&self, course_id: CourseId) -> Result<CourseSummary, Error> {
        self.catalog
            .find_course(course_id)
            .await
            .map_err(map_catalog_error)?
            .ok_or_else(|| Error::not_found(format!("course {course_id} not found")))
    }

    async fn reject_existing_enrollment(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<(), Error> {
        let existing = self
            .enrollments
            .find_by_student_and_course(student_id, course_id)
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(Error::duplicate_enrollment(
                "student is already enrolled in this course",
            ));
        }
        Ok(())
    }

    /// Create the record after a seat has been reserved. Any failure hands
    /// the seat back before the error propagates, so aborts never leak
    /// capacity.
    async fn create_with_seat_held(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Enrollment, Error> {
        match self.enrollments.create(student_id, course_id, Utc::now()).await {
            Ok(enrollment) => Ok(enrollment),
            Err(error) => {
                if let Err(release_error) = self.ledger.release_seat(course_id).await {
                    tracing::error!(
                        %course_id,
                        error = %release_error,
                        "failed to release seat after aborted enrollment",
                    );
                }
                Err(map_repository_error(error))
            }
        }
    }
}

#[async_trait]
impl<L, E, C, S> EnrollmentCommand for EnrollmentEngine<L, E, C, S>
where
    L: CourseSeatLedger,
    E: EnrollmentRepository,
    C: CourseCatalogQuery,
    S: StudentDirectoryQuery,
{
    async fn enroll(&self, request: EnrollRequest) -> Result<EnrollmentDetails, Error> {
        let student_id = request.actor.require_student()?;
        let _guard = self.locks.acquire(request.course_id).await;

        let student = self.require_student_profile(student_id).await?;
        let course = self.require_course(request.course_id).await?;
        self.reject_existing_enrollment(student_id, course.id).await?;

        self.ledger
            .reserve_seat(course.id)
            .await
            .map_err(map_ledger_error)?;
        let enrollment = self.create_with_seat_held(student_id, course.id).await?;

        tracing::info!(
            %student_id,
            course_id = %course.id,
            course_code = %course.code,
            "student enrolled",
        );
        Ok(EnrollmentDetails::from_parts(&enrollment, &student, &course))
    }

    async fn drop(&self, request: DropRequest) -> Result<(), Error> {
        let student_id = request.actor.require_student()?;
        let _guard = self.locks.acquire(request.course_id).await;

        self.enrollments
            .delete(student_id, request.course_id)
            .await
            .map_err(|error| match error {
                EnrollmentRepositoryError::NotFound => {
                    Error::not_found("you are not enrolled in this course")
                }
                other => map_repository_error(other),
            })?;
        // Release is unclamped; a count above capacity surfaces an upstream
        // inconsistency.
        self.ledger
            .release_seat(request.course_id)
            .await
            .map_err(map_ledger_error)?;

        tracing::info!(%student_id, course_id = %request.course_id, "student dropped course");
        Ok(())
    }

    async fn force_enroll(
        &self,
        request: ForceEnrollRequest,
    ) -> Result<EnrollmentDetails, Error> {
        request.actor.require_admin()?;
        let _guard = self.locks.acquire(request.course_id).await;

        let student = self.require_student_profile(request.student_id).await?;
        let course = self.require_course(request.course_id).await?;
        self.reject_existing_enrollment(request.student_id, course.id)
            .await?;

        let seats_after = self
            .ledger
            .force_reserve_seat(course.id)
            .await
            .map_err(map_ledger_error)?;
        let enrollment = self
            .create_with_seat_held(request.student_id, course.id)
            .await?;

        tracing::info!(
            student_id = %request.student_id,
            course_id = %course.id,
            course_code = %course.code,
            seats_after,
            reason = request.reason.as_deref().unwrap_or("none given"),
            "administrative force-enroll",
        );
        if seats_after < 0 {
            tracing::warn!(
                course_id = %course.id,
                seats_after,
                "course over-enrolled by administrative override",
            );
        }
        Ok(EnrollmentDetails::from_parts(&enrollment, &student, &course))
    }

    async fn force_drop(&self, request: ForceDropRequest) -> Result<(), Error> {
        request.actor.require_admin()?;
        let _guard = self.locks.acquire(request.course_id).await;

        self.enrollments
            .delete(request.student_id, request.course_id)
            .await
            .map_err(map_repository_error)?;
        self.ledger
            .release_seat(request.course_id)
            .await
            .map_err(map_ledger_error)?;

        tracing::info!(
            student_id = %request.student_id,
            course_id = %request.course_id,
            reason = request.reason.as_deref().unwrap_or("none given"),
            "administrative force-drop",
        );
        Ok(())
    }

    async fn update_grade(
        &self,
        request: UpdateGradeRequest,
    ) -> Result<EnrollmentDetails, Error> {
        request.actor.require_academic_staff()?;

        let grade = request
            .grade
            .as_deref()
            .map(Grade::from_str)
            .transpose()
            .map_err(|error| Error::invalid_grade(error.to_string()))?;

        let enrollment = self
            .enrollments
            .set_grade(request.enrollment_id, grade)
            .await
            .map_err(|error| match error {
                EnrollmentRepositoryError::NotFound => Error::not_found(format!(
                    "enrollment {} not found",
                    request.enrollment_id
                )),
                other => map_repository_error(other),
            })?;

        let student = self.require_student_profile(enrollment.student_id).await?;
        let course = self.require_course(enrollment.course_id).await?;

        tracing::info!(
            enrollment_id = %enrollment.id,
            student_id = %enrollment.student_id,
            course_id = %enrollment.course_id,
            grade = grade.map(|g| g.to_string()).as_deref().unwrap_or("pending"),
            actor_role = request.actor.role_name(),
            "grade updated",
        );
        Ok(EnrollmentDetails::from_parts(&enrollment, &student, &course))
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
