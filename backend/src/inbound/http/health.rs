//! Liveness probe.

use actix_web::{HttpResponse, get};
use serde::Serialize;
use utoipa::ToSchema;

/// Health probe payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving.
    pub status: &'static str,
}

/// Report process liveness.
#[utoipa::path(
    get,
    path = "/healthz",
    responses((status = 200, description = "Service is live", body = HealthResponse)),
    tags = ["health"],
    operation_id = "healthz"
)]
#[get("/healthz")]
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}
