//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! status codes and JSON envelopes; the domain only distinguishes failure
//! categories and carries a human-readable message.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// A grade string is not on the grading scale.
    InvalidGrade,
    /// No resolved caller identity was supplied.
    Unauthorized,
    /// The caller's role does not permit this operation.
    Forbidden,
    /// The requested student, course, or enrollment does not exist.
    NotFound,
    /// An active enrollment already exists for the student and course.
    DuplicateEnrollment,
    /// The course has no remaining seats on the unforced path.
    CapacityExhausted,
    /// The storage layer reported contention it could not resolve.
    Conflict,
    /// A collaborator (database, catalogue) is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload returned by every fallible operation.
///
/// ## Invariants
/// - `message` is never empty.
///
/// # Examples
/// ```
/// use ucms_backend::domain::{Error, ErrorCode};
///
/// let err = Error::capacity_exhausted("course is full");
/// assert_eq!(err.code(), ErrorCode::CapacityExhausted);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "capacity_exhausted")]
    code: ErrorCode,
    #[schema(example = "course is full, no available seats")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl Error {
    /// Create a new error for the given category.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.trim().is_empty(), "error message must not be empty");
        Self {
            code,
            message,
            details: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidGrade`].
    pub fn invalid_grade(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidGrade, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateEnrollment`].
    pub fn duplicate_enrollment(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateEnrollment, message)
    }

    /// Convenience constructor for [`ErrorCode::CapacityExhausted`].
    pub fn capacity_exhausted(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::CapacityExhausted, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    //! Serialisation and constructor coverage.

    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(Error::not_found("missing"), ErrorCode::NotFound)]
    #[case(Error::duplicate_enrollment("dup"), ErrorCode::DuplicateEnrollment)]
    #[case(Error::capacity_exhausted("full"), ErrorCode::CapacityExhausted)]
    #[case(Error::invalid_grade("bad"), ErrorCode::InvalidGrade)]
    #[case(Error::forbidden("no"), ErrorCode::Forbidden)]
    fn constructors_set_the_code(#[case] error: Error, #[case] code: ErrorCode) {
        assert_eq!(error.code(), code);
    }

    #[rstest]
    fn serialises_with_snake_case_code_and_camel_case_keys() {
        let error = Error::duplicate_enrollment("already enrolled")
            .with_details(json!({ "courseId": "abc" }));
        let value = serde_json::to_value(&error).expect("serialise");

        assert_eq!(value["code"], "duplicate_enrollment");
        assert_eq!(value["message"], "already enrolled");
        assert_eq!(value["details"]["courseId"], "abc");
    }

    #[rstest]
    fn details_are_omitted_when_absent() {
        let value = serde_json::to_value(Error::not_found("gone")).expect("serialise");
        assert!(value.get("details").is_none());
    }

    #[rstest]
    fn display_prints_the_message() {
        assert_eq!(Error::internal("boom").to_string(), "boom");
    }
}
