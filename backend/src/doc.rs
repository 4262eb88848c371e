//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every annotated endpoint and the shared schemas so
//! tooling can export the specification.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "UCMS backend API",
        description = "Enrollment, grading, and academic record endpoints for the \
                       university course-management system."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::enrollments::enroll,
        crate::inbound::http::enrollments::drop_enrollment,
        crate::inbound::http::enrollments::force_enroll,
        crate::inbound::http::enrollments::force_drop,
        crate::inbound::http::enrollments::update_grade,
        crate::inbound::http::enrollments::list_by_student,
        crate::inbound::http::enrollments::list_by_course,
        crate::inbound::http::records::own_schedule,
        crate::inbound::http::records::own_transcript,
        crate::inbound::http::records::student_transcript,
        crate::inbound::http::records::own_gpa,
        crate::inbound::http::records::course_distribution,
        crate::inbound::http::records::course_roster,
        crate::inbound::http::records::grade_analytics,
        crate::inbound::http::health::healthz,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
    )),
    tags(
        (name = "enrollments", description = "Enrollment state machine operations"),
        (name = "records", description = "Academic record projections"),
        (name = "health", description = "Process probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::*;

    #[test]
    fn document_covers_the_enrollment_surface() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/enrollments"));
        assert!(
            paths
                .iter()
                .any(|p| p.as_str() == "/api/v1/records/analytics")
        );
        assert!(paths.iter().any(|p| p.as_str() == "/healthz"));
    }
}
