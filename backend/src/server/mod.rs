//! Application wiring: port implementations, route registration, and the
//! HTTP server loop.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};

use crate::domain::{
    AcademicRecordService, CourseId, CourseSummary, EnrollmentEngine, Student, StudentId,
};
use crate::inbound::http::enrollments::{
    drop_enrollment, enroll, force_drop, force_enroll, list_by_course, list_by_student,
    update_grade,
};
use crate::inbound::http::health::healthz;
use crate::inbound::http::records::{
    course_distribution, course_roster, grade_analytics, own_gpa, own_schedule, own_transcript,
    student_transcript,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    DbPool, DieselCourseCatalog, DieselCourseSeatLedger, DieselEnrollmentRepository,
    DieselStudentDirectory, InMemoryRegistry, PoolConfig, PoolError,
};

/// Build handler state over one in-memory registry.
///
/// The registry is returned alongside the state so callers (tests, the demo
/// seed) can populate courses and students behind the ports.
pub fn in_memory_state() -> (HttpState, Arc<InMemoryRegistry>) {
    let registry = Arc::new(InMemoryRegistry::new());
    let engine = Arc::new(EnrollmentEngine::new(
        Arc::clone(&registry),
        Arc::clone(&registry),
        Arc::clone(&registry),
        Arc::clone(&registry),
    ));
    let records = Arc::new(AcademicRecordService::new(
        Arc::clone(&registry),
        Arc::clone(&registry),
        Arc::clone(&registry),
    ));
    (HttpState::new(engine, records), registry)
}

/// Build handler state over PostgreSQL adapters.
///
/// # Errors
/// Returns [`PoolError`] when the connection pool cannot be constructed.
pub async fn postgres_state(database_url: &str) -> Result<HttpState, PoolError> {
    let pool = DbPool::new(PoolConfig::new(database_url)).await?;
    let ledger = Arc::new(DieselCourseSeatLedger::new(pool.clone()));
    let enrollments = Arc::new(DieselEnrollmentRepository::new(pool.clone()));
    let catalog = Arc::new(DieselCourseCatalog::new(pool.clone()));
    let directory = Arc::new(DieselStudentDirectory::new(pool));

    let engine = Arc::new(EnrollmentEngine::new(
        ledger,
        Arc::clone(&enrollments),
        Arc::clone(&catalog),
        Arc::clone(&directory),
    ));
    let records = Arc::new(AcademicRecordService::new(enrollments, catalog, directory));
    Ok(HttpState::new(engine, records))
}

/// Seed the sample catalogue and a demo student for databaseless runs.
pub fn seed_demo_data(registry: &InMemoryRegistry) {
    let professor = Some("Professor".to_owned());
    for (code, title, capacity) in [
        ("CS101", "Intro to CS", 30),
        ("CS102", "Intro to Networking", 25),
        ("AI100", "Higher Mathematics", 20),
    ] {
        registry.insert_course(CourseSummary {
            id: CourseId::random(),
            code: code.to_owned(),
            title: title.to_owned(),
            semester: "Fall 2026".to_owned(),
            capacity,
            available_seats: capacity,
            professor_name: professor.clone(),
        });
    }

    let student_id = StudentId::random();
    registry.insert_student(Student {
        id: student_id,
        name: "Student".to_owned(),
        email: "student@university.edu".to_owned(),
        student_code: format!("STU-{student_id}"),
    });
}

/// Register every REST endpoint under `/api/v1`.
///
/// Literal segments are registered before parameterised siblings so
/// `/enrollments/force` and `/enrollments/student/...` never fall into the
/// `/enrollments/{course_id}` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(force_enroll)
            .service(force_drop)
            .service(list_by_student)
            .service(list_by_course)
            .service(enroll)
            .service(drop_enrollment)
            .service(update_grade)
            .service(own_schedule)
            .service(own_transcript)
            .service(own_gpa)
            .service(student_transcript)
            .service(course_distribution)
            .service(course_roster)
            .service(grade_analytics),
    );
}

/// Run the HTTP server until shutdown.
///
/// # Errors
/// Returns [`std::io::Error`] when state construction or binding fails.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = match config.database_url.as_deref() {
        Some(url) => postgres_state(url)
            .await
            .map_err(|error| std::io::Error::other(error.to_string()))?,
        None => {
            let (state, registry) = in_memory_state();
            seed_demo_data(&registry);
            tracing::warn!("no database URL configured; serving the seeded in-memory registry");
            state
        }
    };

    let data = web::Data::new(state);
    tracing::info!(host = %config.host, port = config.port, "starting HTTP server");
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .service(healthz)
            .configure(configure_api)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
