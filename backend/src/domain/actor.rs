//! Resolved caller identity.
//!
//! Authentication is owned by the identity collaborator; by the time a
//! request reaches the domain it carries a resolved `(role, profile id)`
//! pair. The engine only checks the role preconditions the registrar's rules
//! demand: students self-serve, admins force, academic staff grade.

use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::student::StudentId;

/// The caller on whose behalf an operation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// A student acting on their own enrollments.
    Student { student_id: StudentId },
    /// A professor recording grades for their courses.
    Professor { professor_id: Uuid },
    /// An administrator with override authority.
    Admin { admin_id: Uuid },
}

impl Actor {
    /// Role label used in audit logs.
    pub fn role_name(&self) -> &'static str {
        match self {
            Self::Student { .. } => "student",
            Self::Professor { .. } => "professor",
            Self::Admin { .. } => "admin",
        }
    }

    /// Require a student caller and return their profile id.
    pub fn require_student(&self) -> Result<StudentId, Error> {
        match self {
            Self::Student { student_id } => Ok(*student_id),
            _ => Err(Error::forbidden("only students may perform this action")),
        }
    }

    /// Require administrative override authority.
    pub fn require_admin(&self) -> Result<(), Error> {
        match self {
            Self::Admin { .. } => Ok(()),
            _ => Err(Error::forbidden("administrator role required")),
        }
    }

    /// Require grading authority (professor or admin).
    pub fn require_academic_staff(&self) -> Result<(), Error> {
        match self {
            Self::Professor { .. } | Self::Admin { .. } => Ok(()),
            Self::Student { .. } => Err(Error::forbidden(
                "only academic staff may record or change grades",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;
    use crate::domain::ErrorCode;

    fn student() -> Actor {
        Actor::Student {
            student_id: StudentId::random(),
        }
    }

    fn professor() -> Actor {
        Actor::Professor {
            professor_id: Uuid::new_v4(),
        }
    }

    fn admin() -> Actor {
        Actor::Admin {
            admin_id: Uuid::new_v4(),
        }
    }

    #[rstest]
    fn only_students_pass_the_student_check() {
        assert!(student().require_student().is_ok());
        for actor in [professor(), admin()] {
            let error = actor.require_student().expect_err("forbidden");
            assert_eq!(error.code(), ErrorCode::Forbidden);
        }
    }

    #[rstest]
    fn only_admins_pass_the_admin_check() {
        assert!(admin().require_admin().is_ok());
        for actor in [student(), professor()] {
            let error = actor.require_admin().expect_err("forbidden");
            assert_eq!(error.code(), ErrorCode::Forbidden);
        }
    }

    #[rstest]
    fn staff_check_admits_professors_and_admins() {
        assert!(professor().require_academic_staff().is_ok());
        assert!(admin().require_academic_staff().is_ok());
        let error = student().require_academic_staff().expect_err("forbidden");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }
}
