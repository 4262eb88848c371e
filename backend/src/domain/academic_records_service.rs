//! Academic record aggregator: the read side of the enrollment core.
//!
//! Every operation is a pure projection over the enrollment store and the
//! course catalogue. Queries are index-backed (by student, by course); the
//! service never scans the whole store and never mutates anything.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::grade::COURSE_CREDITS;
use crate::domain::ports::{
    AcademicRecordsQuery, CourseCatalogError, CourseCatalogQuery, CourseRosterView,
    EnrollmentDetails, EnrollmentRepository, EnrollmentRepositoryError, GradeAnalyticsView,
    GradeDistributionView, RosterEntry, ScheduleView, StudentDirectoryError,
    StudentDirectoryQuery, TranscriptEntry, TranscriptView,
};
use crate::domain::{
    CourseFilter, CourseId, CourseSummary, Enrollment, Error, Grade, Student, StudentId,
};

/// Round half-up to two decimal places, the registrar's display precision.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Credit-weighted GPA over the graded subset; `None` when nothing is
/// graded, which is distinct from a GPA of 0.0.
fn weighted_gpa(enrollments: &[Enrollment]) -> Option<f64> {
    let mut points = 0.0;
    let mut credits = 0u32;
    for enrollment in enrollments {
        if let Some(grade) = enrollment.grade {
            points += grade.grade_points() * f64::from(COURSE_CREDITS);
            credits += COURSE_CREDITS;
        }
    }
    if credits == 0 {
        None
    } else {
        Some(round2(points / f64::from(credits)))
    }
}

/// Running per-letter tallies over one enrollment set.
#[derive(Debug)]
struct GradeTally {
    counts: BTreeMap<Grade, u32>,
    graded: u32,
    pending: u32,
    passing: u32,
    total_points: f64,
}

impl GradeTally {
    /// Start with every letter present at zero.
    fn new() -> Self {
        Self {
            counts: Grade::ALL.into_iter().map(|grade| (grade, 0)).collect(),
            graded: 0,
            pending: 0,
            passing: 0,
            total_points: 0.0,
        }
    }

    fn record(&mut self, grade: Option<Grade>) {
        match grade {
            Some(grade) => {
                *self.counts.entry(grade).or_insert(0) += 1;
                self.graded += 1;
                self.total_points += grade.grade_points();
                if grade.is_passing() {
                    self.passing += 1;
                }
            }
            None => self.pending += 1,
        }
    }

    fn record_all<'a>(&mut self, enrollments: impl IntoIterator<Item = &'a Enrollment>) {
        for enrollment in enrollments {
            self.record(enrollment.grade);
        }
    }

    /// Mean grade points of the graded subset, 0.0 when empty.
    fn average_gpa(&self) -> f64 {
        if self.graded == 0 {
            0.0
        } else {
            round2(self.total_points / f64::from(self.graded))
        }
    }

    /// Per-letter share of the graded subset, in percent.
    fn percentages(&self) -> BTreeMap<Grade, f64> {
        self.counts
            .iter()
            .map(|(grade, count)| {
                let share = if self.graded == 0 {
                    0.0
                } else {
                    round2(f64::from(*count) / f64::from(self.graded) * 100.0)
                };
                (*grade, share)
            })
            .collect()
    }

    /// Share of graded enrollments with a passing grade, in percent.
    fn pass_rate(&self) -> f64 {
        if self.graded == 0 {
            0.0
        } else {
            round2(f64::from(self.passing) / f64::from(self.graded) * 100.0)
        }
    }
}

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

/// Service implementing the academic records query port.
pub struct AcademicRecordService<E, C, S> {
    enrollments: Arc<E>,
    catalog: Arc<C>,
    directory: Arc<S>,
}

impl<E, C, S> AcademicRecordService<E, C, S> {
    /// Create a new aggregator over the given driven ports.
    pub fn new(enrollments: Arc<E>, catalog: Arc<C>, directory: Arc<S>) -> Self {
        Self {
            enrollments,
            catalog,
            directory,
        }
    }
}

impl<E, C, S> AcademicRecordService<E, C, S>
where
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

    /// Resolve the course behind an existing enrollment. A miss here is a
    /// referential inconsistency, not a caller mistake.
    async fn course_for_enrollment(
        &self,
        enrollment: &Enrollment,
    ) -> Result<CourseSummary, Error> {
        self.catalog
            .find_course(enrollment.course_id)
            .await
            .map_err(map_catalog_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "course {} missing for enrollment {}",
                    enrollment.course_id, enrollment.id
                ))
            })
    }

    /// Resolve the student behind an existing enrollment.
    async fn student_for_enrollment(
        &self,
        enrollment: &Enrollment,
    ) -> Result<Student, Error> {
        self.directory
            .find_student(enrollment.student_id)
            .await
            .map_err(map_directory_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "student {} missing for enrollment {}",
                    enrollment.student_id, enrollment.id
                ))
            })
    }

    async fn transcript_entries(
        &self,
        enrollments: &[Enrollment],
    ) -> Result<Vec<TranscriptEntry>, Error> {
        let mut entries = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            let course = self.course_for_enrollment(enrollment).await?;
            let professor_name = course.professor_label();
            entries.push(TranscriptEntry {
                course_code: course.code,
                course_title: course.title,
                semester: course.semester,
                grade: enrollment
                    .grade
                    .map_or_else(|| "In Progress".to_owned(), |grade| grade.to_string()),
                professor_name,
                credits: COURSE_CREDITS,
            });
        }
        Ok(entries)
    }

    fn distribution_view(course: &CourseSummary, tally: &GradeTally) -> GradeDistributionView {
        GradeDistributionView {
            course_id: course.id,
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            semester: course.semester.clone(),
            percentages: tally.percentages(),
            counts: tally.counts.clone(),
            graded_count: tally.graded,
            pending_count: tally.pending,
            average_gpa: tally.average_gpa(),
        }
    }
}

#[async_trait]
impl<E, C, S> AcademicRecordsQuery for AcademicRecordService<E, C, S>
where
    E: EnrollmentRepository,
    C: CourseCatalogQuery,
    S: StudentDirectoryQuery,
{
    async fn gpa(&self, student_id: StudentId) -> Result<Option<f64>, Error> {
        self.require_student_profile(student_id).await?;
        let enrollments = self
            .enrollments
            .list_for_student(student_id)
            .await
            .map_err(map_repository_error)?;
        Ok(weighted_gpa(&enrollments))
    }

    async fn transcript(&self, student_id: StudentId) -> Result<TranscriptView, Error> {
        let student = self.require_student_profile(student_id).await?;
        let enrollments = self
            .enrollments
            .list_for_student(student_id)
            .await
            .map_err(map_repository_error)?;

        let entries = self.transcript_entries(&enrollments).await?;
        let graded = enrollments.iter().filter(|e| e.is_graded()).count() as u32;

        Ok(TranscriptView {
            student_id,
            student_name: student.name,
            email: student.email,
            gpa: weighted_gpa(&enrollments),
            total_credits: enrollments.len() as u32 * COURSE_CREDITS,
            completed_credits: graded * COURSE_CREDITS,
            entries,
        })
    }

    async fn student_schedule(&self, student_id: StudentId) -> Result<ScheduleView, Error> {
        self.require_student_profile(student_id).await?;
        let enrollments = self
            .enrollments
            .list_for_student(student_id)
            .await
            .map_err(map_repository_error)?;

        let entries = self.transcript_entries(&enrollments).await?;
        Ok(ScheduleView {
            student_id,
            total_credits: enrollments.len() as u32 * COURSE_CREDITS,
            gpa: weighted_gpa(&enrollments),
            entries,
        })
    }

    async fn course_grade_distribution(
        &self,
        course_id: CourseId,
    ) -> Result<GradeDistributionView, Error> {
        let course = self.require_course(course_id).await?;
        let enrollments = self
            .enrollments
            .list_for_course(course_id)
            .await
            .map_err(map_repository_error)?;

        let mut tally = GradeTally::new();
        tally.record_all(&enrollments);
        Ok(Self::distribution_view(&course, &tally))
    }

    async fn course_roster(&self, course_id: CourseId) -> Result<CourseRosterView, Error> {
        let course = self.require_course(course_id).await?;
        let enrollments = self
            .enrollments
            .list_for_course(course_id)
            .await
            .map_err(map_repository_error)?;

        let mut students = Vec::with_capacity(enrollments.len());
        for enrollment in &enrollments {
            let student = self.student_for_enrollment(enrollment).await?;
            students.push(RosterEntry {
                student_id: student.id,
                student_name: student.name,
                student_email: student.email,
                grade: enrollment.grade,
                enrolled_at: enrollment.enrolled_at,
            });
        }

        let mut tally = GradeTally::new();
        tally.record_all(&enrollments);

        Ok(CourseRosterView {
            course_id: course.id,
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            semester: course.semester.clone(),
            professor_name: course.professor_label(),
            capacity: course.capacity,
            available_seats: course.available_seats,
            enrolled_count: enrollments.len() as u32,
            students,
            distribution: Self::distribution_view(&course, &tally),
        })
    }

    async fn grade_analytics(
        &self,
        filter: CourseFilter,
    ) -> Result<GradeAnalyticsView, Error> {
        let courses = self
            .catalog
            .list_courses(filter.clone())
            .await
            .map_err(map_catalog_error)?;

        let mut tally = GradeTally::new();
        for course in &courses {
            let enrollments = self
                .enrollments
                .list_for_course(course.id)
                .await
                .map_err(map_repository_error)?;
            tally.record_all(&enrollments);
        }

        Ok(GradeAnalyticsView {
            semester: filter.semester,
            course_code: filter.code,
            percentages: tally.percentages(),
            pass_rate: tally.pass_rate(),
            average_gpa: tally.average_gpa(),
            counts: tally.counts,
            graded_count: tally.graded,
            pending_count: tally.pending,
        })
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<EnrollmentDetails>, Error> {
        let student = self.require_student_profile(student_id).await?;
        let enrollments = self
            .enrollments
            .list_for_student(student_id)
            .await
            .map_err(map_repository_error)?;

        let mut details = Vec::with_capacity(enrollments.len());
        for enrollment in &enrollments {
            let course = self.course_for_enrollment(enrollment).await?;
            details.push(EnrollmentDetails::from_parts(enrollment, &student, &course));
        }
        Ok(details)
    }

    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<EnrollmentDetails>, Error> {
        let course = self.require_course(course_id).await?;
        let enrollments = self
            .enrollments
            .list_for_course(course_id)
            .await
            .map_err(map_repository_error)?;

        let mut details = Vec::with_capacity(enrollments.len());
        for enrollment in &enrollments {
            let student = self.student_for_enrollment(enrollment).await?;
            details.push(EnrollmentDetails::from_parts(enrollment, &student, &course));
        }
        Ok(details)
    }
}

#[cfg(test)]
#[path = "academic_records_service_tests.rs"]
mod tests;
