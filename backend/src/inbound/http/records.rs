//! Academic record read endpoints.
//!
//! ```text
//! GET /api/v1/records/schedule                          Own schedule
//! GET /api/v1/records/transcript                        Own transcript
//! GET /api/v1/records/transcript/{student_id}           Transcript (staff)
//! GET /api/v1/records/gpa                               Own GPA figure
//! GET /api/v1/records/course/{course_id}/distribution   Grade distribution
//! GET /api/v1/records/course/{course_id}/roster         Roster (staff)
//! GET /api/v1/records/analytics                         Filtered analytics (staff)
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{
    CourseRosterView, GradeAnalyticsView, GradeDistributionView, RosterEntry, ScheduleView,
    TranscriptEntry, TranscriptView,
};
use crate::domain::{CourseFilter, CourseId, Error, StudentId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::actor::ActorContext;
use crate::inbound::http::state::HttpState;

/// One transcript line.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptEntryDto {
    #[schema(example = "CS101")]
    pub course_code: String,
    pub course_title: String,
    pub semester: String,
    /// Letter grade or `"In Progress"`.
    pub grade: String,
    /// Professor name or `"TBA"`.
    pub professor_name: String,
    pub credits: u32,
}

impl From<TranscriptEntry> for TranscriptEntryDto {
    fn from(entry: TranscriptEntry) -> Self {
        Self {
            course_code: entry.course_code,
            course_title: entry.course_title,
            semester: entry.semester,
            grade: entry.grade,
            professor_name: entry.professor_name,
            credits: entry.credits,
        }
    }
}

/// Full transcript payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptResponse {
    pub student_id: StudentId,
    pub student_name: String,
    pub email: String,
    /// Absent until at least one enrollment is graded.
    pub gpa: Option<f64>,
    pub total_credits: u32,
    pub completed_credits: u32,
    pub entries: Vec<TranscriptEntryDto>,
}

impl From<TranscriptView> for TranscriptResponse {
    fn from(view: TranscriptView) -> Self {
        Self {
            student_id: view.student_id,
            student_name: view.student_name,
            email: view.email,
            gpa: view.gpa,
            total_credits: view.total_credits,
            completed_credits: view.completed_credits,
            entries: view.entries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Current schedule payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub student_id: StudentId,
    pub total_credits: u32,
    pub gpa: Option<f64>,
    pub entries: Vec<TranscriptEntryDto>,
}

impl From<ScheduleView> for ScheduleResponse {
    fn from(view: ScheduleView) -> Self {
        Self {
            student_id: view.student_id,
            total_credits: view.total_credits,
            gpa: view.gpa,
            entries: view.entries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Standalone GPA payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GpaResponse {
    pub student_id: StudentId,
    /// Absent until at least one enrollment is graded.
    #[schema(example = 3.5)]
    pub gpa: Option<f64>,
}

/// Grade distribution payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistributionResponse {
    pub course_id: CourseId,
    pub course_code: String,
    pub course_title: String,
    pub semester: String,
    /// Per-letter counts, every letter present.
    #[schema(value_type = Object)]
    pub counts: BTreeMap<String, u32>,
    /// Per-letter share of the graded subset, in percent.
    #[schema(value_type = Object)]
    pub percentages: BTreeMap<String, f64>,
    pub graded_count: u32,
    pub pending_count: u32,
    pub average_gpa: f64,
}

impl From<GradeDistributionView> for DistributionResponse {
    fn from(view: GradeDistributionView) -> Self {
        Self {
            course_id: view.course_id,
            course_code: view.course_code,
            course_title: view.course_title,
            semester: view.semester,
            counts: view
                .counts
                .into_iter()
                .map(|(grade, count)| (grade.to_string(), count))
                .collect(),
            percentages: view
                .percentages
                .into_iter()
                .map(|(grade, share)| (grade.to_string(), share))
                .collect(),
            graded_count: view.graded_count,
            pending_count: view.pending_count,
            average_gpa: view.average_gpa,
        }
    }
}

/// System-wide analytics payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub semester: Option<String>,
    pub course_code: Option<String>,
    #[schema(value_type = Object)]
    pub counts: BTreeMap<String, u32>,
    #[schema(value_type = Object)]
    pub percentages: BTreeMap<String, f64>,
    pub graded_count: u32,
    pub pending_count: u32,
    pub average_gpa: f64,
    /// Percentage of graded enrollments whose grade is not `F`.
    #[schema(example = 85.71)]
    pub pass_rate: f64,
}

impl From<GradeAnalyticsView> for AnalyticsResponse {
    fn from(view: GradeAnalyticsView) -> Self {
        Self {
            semester: view.semester,
            course_code: view.course_code,
            counts: view
                .counts
                .into_iter()
                .map(|(grade, count)| (grade.to_string(), count))
                .collect(),
            percentages: view
                .percentages
                .into_iter()
                .map(|(grade, share)| (grade.to_string(), share))
                .collect(),
            graded_count: view.graded_count,
            pending_count: view.pending_count,
            average_gpa: view.average_gpa,
            pass_rate: view.pass_rate,
        }
    }
}

/// One roster row.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryDto {
    pub student_id: StudentId,
    pub student_name: String,
    pub student_email: String,
    /// Letter grade, absent while pending.
    pub grade: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}

impl From<RosterEntry> for RosterEntryDto {
    fn from(entry: RosterEntry) -> Self {
        Self {
            student_id: entry.student_id,
            student_name: entry.student_name,
            student_email: entry.student_email,
            grade: entry.grade.map(|grade| grade.to_string()),
            enrolled_at: entry.enrolled_at,
        }
    }
}

/// Course roster payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    pub course_id: CourseId,
    pub course_code: String,
    pub course_title: String,
    pub semester: String,
    pub professor_name: String,
    pub capacity: i32,
    /// Negative only after forced over-enrollment.
    pub available_seats: i32,
    pub enrolled_count: u32,
    pub students: Vec<RosterEntryDto>,
    pub distribution: DistributionResponse,
}

impl From<CourseRosterView> for RosterResponse {
    fn from(view: CourseRosterView) -> Self {
        Self {
            course_id: view.course_id,
            course_code: view.course_code,
            course_title: view.course_title,
            semester: view.semester,
            professor_name: view.professor_name,
            capacity: view.capacity,
            available_seats: view.available_seats,
            enrolled_count: view.enrolled_count,
            students: view.students.into_iter().map(Into::into).collect(),
            distribution: view.distribution.into(),
        }
    }
}

/// Analytics filter parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsParams {
    pub semester: Option<String>,
    pub course_code: Option<String>,
}

/// Fetch the calling student's schedule.
#[utoipa::path(
    get,
    path = "/api/v1/records/schedule",
    responses(
        (status = 200, description = "Current schedule", body = ScheduleResponse),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not a student", body = Error)
    ),
    tags = ["records"],
    operation_id = "getOwnSchedule"
)]
#[get("/records/schedule")]
pub async fn own_schedule(
    state: web::Data<HttpState>,
    actor: ActorContext,
) -> ApiResult<HttpResponse> {
    let student_id = actor.require()?.require_student()?;
    let view = state.records.student_schedule(student_id).await?;
    Ok(HttpResponse::Ok().json(ScheduleResponse::from(view)))
}

/// Fetch the calling student's transcript.
#[utoipa::path(
    get,
    path = "/api/v1/records/transcript",
    responses(
        (status = 200, description = "Transcript", body = TranscriptResponse),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not a student", body = Error)
    ),
    tags = ["records"],
    operation_id = "getOwnTranscript"
)]
#[get("/records/transcript")]
pub async fn own_transcript(
    state: web::Data<HttpState>,
    actor: ActorContext,
) -> ApiResult<HttpResponse> {
    let student_id = actor.require()?.require_student()?;
    let view = state.records.transcript(student_id).await?;
    Ok(HttpResponse::Ok().json(TranscriptResponse::from(view)))
}

/// Fetch any student's transcript (professor or admin).
#[utoipa::path(
    get,
    path = "/api/v1/records/transcript/{student_id}",
    params(("student_id" = Uuid, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Transcript", body = TranscriptResponse),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not academic staff", body = Error),
        (status = 404, description = "Student not found", body = Error)
    ),
    tags = ["records"],
    operation_id = "getTranscript"
)]
#[get("/records/transcript/{student_id}")]
pub async fn student_transcript(
    state: web::Data<HttpState>,
    actor: ActorContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    actor.require()?.require_academic_staff()?;
    let view = state
        .records
        .transcript(StudentId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(TranscriptResponse::from(view)))
}

/// Fetch the calling student's GPA figure.
#[utoipa::path(
    get,
    path = "/api/v1/records/gpa",
    responses(
        (status = 200, description = "GPA figure", body = GpaResponse),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not a student", body = Error)
    ),
    tags = ["records"],
    operation_id = "getOwnGpa"
)]
#[get("/records/gpa")]
pub async fn own_gpa(state: web::Data<HttpState>, actor: ActorContext) -> ApiResult<HttpResponse> {
    let student_id = actor.require()?.require_student()?;
    let gpa = state.records.gpa(student_id).await?;
    Ok(HttpResponse::Ok().json(GpaResponse { student_id, gpa }))
}

/// Fetch a course's grade distribution.
#[utoipa::path(
    get,
    path = "/api/v1/records/course/{course_id}/distribution",
    params(("course_id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Grade distribution", body = DistributionResponse),
        (status = 401, description = "No caller identity", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["records"],
    operation_id = "getDistribution"
)]
#[get("/records/course/{course_id}/distribution")]
pub async fn course_distribution(
    state: web::Data<HttpState>,
    actor: ActorContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    actor.require()?;
    let view = state
        .records
        .course_grade_distribution(CourseId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(DistributionResponse::from(view)))
}

/// Fetch a course roster (professor or admin).
#[utoipa::path(
    get,
    path = "/api/v1/records/course/{course_id}/roster",
    params(("course_id" = Uuid, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course roster", body = RosterResponse),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not academic staff", body = Error),
        (status = 404, description = "Course not found", body = Error)
    ),
    tags = ["records"],
    operation_id = "getRoster"
)]
#[get("/records/course/{course_id}/roster")]
pub async fn course_roster(
    state: web::Data<HttpState>,
    actor: ActorContext,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    actor.require()?.require_academic_staff()?;
    let view = state
        .records
        .course_roster(CourseId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(RosterResponse::from(view)))
}

/// Fetch grade analytics over the filtered enrollment set (professor or admin).
#[utoipa::path(
    get,
    path = "/api/v1/records/analytics",
    params(
        ("semester" = Option<String>, Query, description = "Restrict to one term label"),
        ("courseCode" = Option<String>, Query, description = "Restrict to one course code")
    ),
    responses(
        (status = 200, description = "Grade analytics", body = AnalyticsResponse),
        (status = 401, description = "No caller identity", body = Error),
        (status = 403, description = "Caller is not academic staff", body = Error)
    ),
    tags = ["records"],
    operation_id = "getAnalytics"
)]
#[get("/records/analytics")]
pub async fn grade_analytics(
    state: web::Data<HttpState>,
    actor: ActorContext,
    params: web::Query<AnalyticsParams>,
) -> ApiResult<HttpResponse> {
    actor.require()?.require_academic_staff()?;
    let params = params.into_inner();
    let view = state
        .records
        .grade_analytics(CourseFilter {
            semester: params.semester,
            code: params.course_code,
        })
        .await?;
    Ok(HttpResponse::Ok().json(AnalyticsResponse::from(view)))
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod tests;
