//! Enrollment command and listing endpoints.
//!
//! ```text
//! POST   /api/v1/enrollments                                   Self-service enroll
//! DELETE /api/v1/enrollments/{course_id}                       Self-service drop
//! POST   /api/v1/enrollments/force                             Admin force-enroll
//! DELETE /api/v1/enrollments/force/{student_id}/{course_id}    Admin force-drop
//! PUT    /api/v1/enrollments/{enrollment_id}/grade             Record or clear a grade
//! GET    /api/v1/enrollments/student/{student_id}              Listing by student
//! GET    /api/v1/enrollments/course/{course_id}                Listing by course
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    DropRequest, EnrollRequest, EnrollmentCommand, EnrollmentDetails, ForceDropRequest,
    ForceEnrollRequest, UpdateGradeRequest,
};
use crate::domain::{CourseId, Error, EnrollmentId, StudentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::ActorContext;
use crate::inbound::http::state::HttpState;

/// Enrollment record joined for display.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub enrollment_id: EnrollmentId,
    pub student_id: StudentId,
    #[schema(example = "Ada Lovelace")]
    pub student_name: String,
    pub student_email: String,
    pub course_id: CourseId,
    #[schema(example = "CS101")]
    pub course_code: String,
    pub course_title: String,
    #[schema(example = "Fall 2026")]
    pub semester: String,
    pub enrolled_at: DateTime<Utc>,
    /// Letter grade, absent while pending.
    #[schema(example = "A+")]
    pub grade: Option<String>,
    /// `"Graded"` or `"Pending"`.
    pub status: String,
}

impl From<EnrollmentDetails> for EnrollmentResponse {
    fn from(details: EnrollmentDetails) -> Self {
        Self {
            status: details.grade_status().to_owned(),
            enrollment_id: details.enrollment_id,
            student_id: details.student_id,
            student_name: details.student_name,
            student_email: details.student_email,
            course_id: details.course_id,
            course_code: details.course_code,
            course_title: details.course_title,
            semester: details.semester,
            enrolled_at: details.enrolled_at,
            grade: details.grade.map(|grade| grade.to_string()),
        }
    }
}

/// Self-service enrollment body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollBody {
    pub course_id: CourseId,
}

/// Administrative force-enroll body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForceEnrollBody {
    pub student_id: StudentId,
    pub course_id: CourseId,
    /// Audit annotation; logged, never behavioural.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Query parameters accepted by the force-drop endpoint.
#[derive(Debug, Deserialize)]
pub struct ForceDropParams {
    pub reason: Option<String>,
}

/// Grade update body; `null` reverts the enrollment to pending.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeBody {
    #[schema(example = "A+")]
    pub grade: Option<String>,
}

/// Enroll the calling student in a course.
#[utoipa::path(
    post,
    path = "/api/v1/enrollments",
    request_body = EnrollBody,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not a student", body = Error),
        (status = 404, description = "Student or course not found", body = Error),
        (status = 409, description = "Duplicate enrollment or course full", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "enroll"
)]
#[post("/enrollments")]
pub async fn enroll(
    state: web::Data<HttpState>,
    actor: ActorContext,
    body: web::Json<EnrollBody>,
) -> ApiResult<HttpResponse> {
    let details = state
        .enrollments
        .enroll(EnrollRequest {
            actor: actor.require()?,
            course_id: body.course_id,
        })
        .await?;
    Ok(HttpResponse::Created().json(EnrollmentResponse::from(details)))
}

/// Drop the calling student's enrollment in a course.
#[utoipa::path(
    delete,
    path = "/api/v1/enrollments/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 204, description = "Enrollment dropped"),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not a student", body = Error),
        (status = 404, description = "Not enrolled in this course", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "dropEnrollment"
)]
#[delete("/enrollments/{course_id}")]
pub async fn drop_enrollment(
    state: web::Data<HttpState>,
    actor: ActorContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    EnrollmentCommand::drop(
        state.enrollments.as_ref(),
        DropRequest {
            actor: actor.require()?,
            course_id: CourseId::new(path.into_inner()),
        },
    )
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Enroll any student past the capacity check (admin only).
#[utoipa::path(
    post,
    path = "/api/v1/enrollments/force",
    request_body = ForceEnrollBody,
    responses(
        (status = 201, description = "Enrollment created", body = EnrollmentResponse),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 404, description = "Student or course not found", body = Error),
        (status = 409, description = "Duplicate enrollment", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "forceEnroll"
)]
#[post("/enrollments/force")]
pub async fn force_enroll(
    state: web::Data<HttpState>,
    actor: ActorContext,
    body: web::Json<ForceEnrollBody>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let details = state
        .enrollments
        .force_enroll(ForceEnrollRequest {
            actor: actor.require()?,
            student_id: body.student_id,
            course_id: body.course_id,
            reason: body.reason,
        })
        .await?;
    Ok(HttpResponse::Created().json(EnrollmentResponse::from(details)))
}

/// Drop any student's enrollment (admin only).
#[utoipa::path(
    delete,
    path = "/api/v1/enrollments/force/{student_id}/{course_id}",
    params(
        ("student_id" = Uuid, Path, description = "Student identifier"),
        ("course_id" = Uuid, Path, description = "Course identifier"),
        ("reason" = Option<String>, Query, description = "Audit annotation")
    ),
    responses(
        (status = 204, description = "Enrollment dropped"),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not an admin", body = Error),
        (status = 404, description = "Enrollment not found", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "forceDrop"
)]
#[delete("/enrollments/force/{student_id}/{course_id}")]
pub async fn force_drop(
    state: web::Data<HttpState>,
    actor: ActorContext,
    path: web::Path<(Uuid, Uuid)>,
    params: web::Query<ForceDropParams>,
) -> ApiResult<HttpResponse> {
    let (student_id, course_id) = path.into_inner();
    state
        .enrollments
        .force_drop(ForceDropRequest {
            actor: actor.require()?,
            student_id: StudentId::new(student_id),
            course_id: CourseId::new(course_id),
            reason: params.into_inner().reason,
        })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Record, replace, or clear a grade (professor or admin).
#[utoipa::path(
    put,
    path = "/api/v1/enrollments/{enrollment_id}/grade",
    params(("enrollment_id" = Uuid, Path, description = "Enrollment identifier")),
    request_body = GradeBody,
    responses(
        (status = 200, description = "Grade updated", body = EnrollmentResponse),
        (status = 400, description = "Grade is not on the scale", body = Error),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not academic staff", body = Error),
        (status = 404, description = "Enrollment not found", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "updateGrade"
)]
#[put("/enrollments/{enrollment_id}/grade")]
pub async fn update_grade(
    state: web::Data<HttpState>,
    actor: ActorContext,
    path: web::Path<Uuid>,
    body: web::Json<GradeBody>,
) -> ApiResult<HttpResponse> {
    let details = state
        .enrollments
        .update_grade(UpdateGradeRequest {
            actor: actor.require()?,
            enrollment_id: EnrollmentId::new(path.into_inner()),
            grade: body.into_inner().grade,
        })
        .await?;
    Ok(HttpResponse::Ok().json(EnrollmentResponse::from(details)))
}

/// List one student's enrollments, insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/enrollments/student/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Enrollment listing", body = [EnrollmentResponse]),
        (status = 401, description = "No caller identity", body = Error),
        (status = 404, description = "Student not found", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollmentsByStudent"
)]
#[get("/enrollments/student/{student_id}")]
pub async fn list_by_student(
    state: web::Data<HttpState>,
    actor: ActorContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    actor.require()?;
    let listing = state
        .records
        .list_for_student(StudentId::new(path.into_inner()))
        .await?;
    let body: Vec<EnrollmentResponse> =
        listing.into_iter().map(EnrollmentResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// List one course's enrollments, insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/enrollments/course/{course_id}",
    params(("course_id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Enrollment listing", body = [EnrollmentResponse]),
        (status = 401, description = "No caller identity", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["enrollments"],
    operation_id = "listEnrollmentsByCourse"
)]
#[get("/enrollments/course/{course_id}")]
pub async fn list_by_course(
    state: web::Data<HttpState>,
    actor: ActorContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    actor.require()?;
    let listing = state
        .records
        .list_for_course(CourseId::new(path.into_inner()))
        .await?;
    let body: Vec<EnrollmentResponse> =
        listing.into_iter().map(EnrollmentResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
#[path = "enrollments_tests.rs"]
mod tests;
