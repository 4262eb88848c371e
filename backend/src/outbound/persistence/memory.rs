//! In-memory implementation of all four driven ports.
//!
//! Backs handler tests, end-to-end flows, and databaseless runs. One mutex
//! guards the whole registry, so the seat check-and-act has the same
//! atomicity as the conditional UPDATE in the PostgreSQL ledger.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    CourseCatalogError, CourseCatalogQuery, CourseSeatLedger, CourseSeatLedgerError,
    EnrollmentRepository, EnrollmentRepositoryError, StudentDirectoryError, StudentDirectoryQuery,
};
use crate::domain::{
    CourseFilter, CourseId, CourseSummary, Enrollment, EnrollmentId, Grade, Student, StudentId,
};

#[derive(Debug, Default)]
struct RegistryState {
    courses: HashMap<CourseId, CourseSummary>,
    students: HashMap<StudentId, Student>,
    /// Insertion order is listing order.
    enrollments: Vec<Enrollment>,
}

/// Mutex-guarded registry implementing the ledger, store, catalogue, and
/// directory ports.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed or replace a course.
    pub fn insert_course(&self, course: CourseSummary) {
        self.lock().courses.insert(course.id, course);
    }

    /// Seed or replace a student profile.
    pub fn insert_student(&self, student: Student) {
        self.lock().students.insert(student.id, student);
    }

    /// Current catalogue entry for a course, seat count included.
    pub fn course(&self, course_id: CourseId) -> Option<CourseSummary> {
        self.lock().courses.get(&course_id).cloned()
    }
}

#[async_trait]
impl CourseSeatLedger for InMemoryRegistry {
    async fn reserve_seat(&self, course_id: CourseId) -> Result<(), CourseSeatLedgerError> {
        let mut state = self.lock();
        let course = state
            .courses
            .get_mut(&course_id)
            .ok_or(CourseSeatLedgerError::CourseNotFound)?;
        if course.available_seats <= 0 {
            return Err(CourseSeatLedgerError::Exhausted);
        }
        course.available_seats -= 1;
        Ok(())
    }

    async fn force_reserve_seat(
        &self,
        course_id: CourseId,
    ) -> Result<i32, CourseSeatLedgerError> {
        let mut state = self.lock();
        let course = state
            .courses
            .get_mut(&course_id)
            .ok_or(CourseSeatLedgerError::CourseNotFound)?;
        course.available_seats -= 1;
        Ok(course.available_seats)
    }

    async fn release_seat(&self, course_id: CourseId) -> Result<(), CourseSeatLedgerError> {
        let mut state = self.lock();
        let course = state
            .courses
            .get_mut(&course_id)
            .ok_or(CourseSeatLedgerError::CourseNotFound)?;
        course.available_seats += 1;
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryRegistry {
    async fn create(
        &self,
        student_id: StudentId,
        course_id: CourseId,
        enrolled_at: DateTime<Utc>,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut state = self.lock();
        if state
            .enrollments
            .iter()
            .any(|e| e.student_id == student_id && e.course_id == course_id)
        {
            return Err(EnrollmentRepositoryError::Duplicate);
        }
        let enrollment = Enrollment {
            id: EnrollmentId::random(),
            student_id,
            course_id,
            enrolled_at,
            grade: None,
        };
        state.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    async fn find_by_student_and_course(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self
            .lock()
            .enrollments
            .iter()
            .find(|e| e.student_id == student_id && e.course_id == course_id)
            .cloned())
    }

    async fn find_by_id(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<Option<Enrollment>, EnrollmentRepositoryError> {
        Ok(self
            .lock()
            .enrollments
            .iter()
            .find(|e| e.id == enrollment_id)
            .cloned())
    }

    async fn list_for_student(
        &self,
        student_id: StudentId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        Ok(self
            .lock()
            .enrollments
            .iter()
            .filter(|e| e.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn list_for_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<Enrollment>, EnrollmentRepositoryError> {
        Ok(self
            .lock()
            .enrollments
            .iter()
            .filter(|e| e.course_id == course_id)
            .cloned()
            .collect())
    }

    async fn set_grade(
        &self,
        enrollment_id: EnrollmentId,
        grade: Option<Grade>,
    ) -> Result<Enrollment, EnrollmentRepositoryError> {
        let mut state = self.lock();
        let enrollment = state
            .enrollments
            .iter_mut()
            .find(|e| e.id == enrollment_id)
            .ok_or(EnrollmentRepositoryError::NotFound)?;
        enrollment.grade = grade;
        Ok(enrollment.clone())
    }

    async fn delete(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<(), EnrollmentRepositoryError> {
        let mut state = self.lock();
        let position = state
            .enrollments
            .iter()
            .position(|e| e.student_id == student_id && e.course_id == course_id)
            .ok_or(EnrollmentRepositoryError::NotFound)?;
        state.enrollments.remove(position);
        Ok(())
    }
}

#[async_trait]
impl CourseCatalogQuery for InMemoryRegistry {
    async fn find_course(
        &self,
        course_id: CourseId,
    ) -> Result<Option<CourseSummary>, CourseCatalogError> {
        Ok(self.lock().courses.get(&course_id).cloned())
    }

    async fn list_courses(
        &self,
        filter: CourseFilter,
    ) -> Result<Vec<CourseSummary>, CourseCatalogError> {
        let mut courses: Vec<CourseSummary> = self
            .lock()
            .courses
            .values()
            .filter(|course| filter.matches(course))
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(courses)
    }
}

#[async_trait]
impl StudentDirectoryQuery for InMemoryRegistry {
    async fn find_student(
        &self,
        student_id: StudentId,
    ) -> Result<Option<Student>, StudentDirectoryError> {
        Ok(self.lock().students.get(&student_id).cloned())
    }
}
