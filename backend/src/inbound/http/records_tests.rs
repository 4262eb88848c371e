//! Handler tests for the academic record endpoints.

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::ports::EnrollmentRepository;
use crate::domain::{COURSE_CREDITS, CourseId, CourseSummary, Grade, Student, StudentId};
use crate::inbound::http::actor::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
use crate::outbound::persistence::InMemoryRegistry;
use crate::server::{configure_api, in_memory_state};

macro_rules! init_app {
    ($state:expr) => {
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_api),
        )
        .await
    };
}

fn student_fixture(registry: &InMemoryRegistry, name: &str) -> StudentId {
    let id = StudentId::random();
    registry.insert_student(Student {
        id,
        name: name.to_owned(),
        email: format!("{}@example.edu", name.to_ascii_lowercase().replace(' ', ".")),
        student_code: format!("STU-{id}"),
    });
    id
}

fn course_fixture(
    registry: &InMemoryRegistry,
    code: &str,
    professor_name: Option<&str>,
) -> CourseId {
    let id = CourseId::random();
    registry.insert_course(CourseSummary {
        id,
        code: code.to_owned(),
        title: format!("{code} lectures"),
        semester: "Fall 2026".to_owned(),
        capacity: 30,
        available_seats: 30,
        professor_name: professor_name.map(str::to_owned),
    });
    id
}

async fn seed_enrollment(
    registry: &InMemoryRegistry,
    student_id: StudentId,
    course_id: CourseId,
    grade: Option<Grade>,
) {
    let enrollment = registry
        .create(student_id, course_id, chrono::Utc::now())
        .await
        .expect("create enrollment");
    if grade.is_some() {
        registry
            .set_grade(enrollment.id, grade)
            .await
            .expect("set grade");
    }
}

fn as_student(request: actix_test::TestRequest, student_id: StudentId) -> actix_test::TestRequest {
    request
        .insert_header((ACTOR_ROLE_HEADER, "student"))
        .insert_header((ACTOR_ID_HEADER, student_id.to_string()))
}

fn as_professor(request: actix_test::TestRequest) -> actix_test::TestRequest {
    request
        .insert_header((ACTOR_ROLE_HEADER, "professor"))
        .insert_header((ACTOR_ID_HEADER, Uuid::new_v4().to_string()))
}

#[actix_web::test]
async fn transcript_reports_gpa_credits_and_sentinels() {
    let (state, registry) = in_memory_state();
    let student_id = student_fixture(&registry, "Grace Hopper");
    let graded = course_fixture(&registry, "CS101", Some("Dr. Hamilton"));
    let pending = course_fixture(&registry, "CS102", None);
    seed_enrollment(&registry, student_id, graded, Some(Grade::A)).await;
    seed_enrollment(&registry, student_id, pending, None).await;
    let app = init_app!(state);

    let request = as_student(actix_test::TestRequest::get(), student_id)
        .uri("/api/v1/records/transcript")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["studentName"], "Grace Hopper");
    assert_eq!(body["gpa"], 4.0);
    assert_eq!(body["totalCredits"], 2 * COURSE_CREDITS);
    assert_eq!(body["completedCredits"], COURSE_CREDITS);
    let entries = body["entries"].as_array().expect("entries");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["grade"], "A");
    assert_eq!(entries[1]["grade"], "In Progress");
    assert_eq!(entries[1]["professorName"], "TBA");
}

#[actix_web::test]
async fn own_transcript_rejects_staff_and_anonymous_callers() {
    let (state, _registry) = in_memory_state();
    let app = init_app!(state);

    let staff = as_professor(actix_test::TestRequest::get())
        .uri("/api/v1/records/transcript")
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, staff).await.status(),
        StatusCode::FORBIDDEN
    );

    let anonymous = actix_test::TestRequest::get()
        .uri("/api/v1/records/transcript")
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, anonymous).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn staff_transcript_lookup_answers_not_found_for_unknown_students() {
    let (state, _registry) = in_memory_state();
    let app = init_app!(state);

    let request = as_professor(actix_test::TestRequest::get())
        .uri(&format!("/api/v1/records/transcript/{}", Uuid::new_v4()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn staff_transcript_lookup_rejects_students() {
    let (state, registry) = in_memory_state();
    let student_id = student_fixture(&registry, "Grace Hopper");
    let other = student_fixture(&registry, "Ada Lovelace");
    let app = init_app!(state);

    let request = as_student(actix_test::TestRequest::get(), student_id)
        .uri(&format!("/api/v1/records/transcript/{other}"))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, request).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn schedule_counts_every_active_enrollment() {
    let (state, registry) = in_memory_state();
    let student_id = student_fixture(&registry, "Grace Hopper");
    let first = course_fixture(&registry, "CS101", Some("Dr. Hamilton"));
    let second = course_fixture(&registry, "CS102", Some("Dr. Hamilton"));
    seed_enrollment(&registry, student_id, first, Some(Grade::BPlus)).await;
    seed_enrollment(&registry, student_id, second, None).await;
    let app = init_app!(state);

    let request = as_student(actix_test::TestRequest::get(), student_id)
        .uri("/api/v1/records/schedule")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["totalCredits"], 2 * COURSE_CREDITS);
    assert_eq!(body["entries"].as_array().expect("entries").len(), 2);
}

#[actix_web::test]
async fn gpa_endpoint_averages_graded_enrollments() {
    let (state, registry) = in_memory_state();
    let student_id = student_fixture(&registry, "Grace Hopper");
    let first = course_fixture(&registry, "CS101", None);
    let second = course_fixture(&registry, "CS102", None);
    seed_enrollment(&registry, student_id, first, Some(Grade::APlus)).await;
    seed_enrollment(&registry, student_id, second, Some(Grade::B)).await;
    let app = init_app!(state);

    let request = as_student(actix_test::TestRequest::get(), student_id)
        .uri("/api/v1/records/gpa")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["gpa"], 3.5);
}

#[actix_web::test]
async fn distribution_tallies_counts_percentages_and_pending() {
    let (state, registry) = in_memory_state();
    let course_id = course_fixture(&registry, "CS101", Some("Dr. Hamilton"));
    let grades = [
        Some(Grade::A),
        Some(Grade::A),
        Some(Grade::B),
        Some(Grade::F),
        None,
    ];
    for (index, grade) in grades.into_iter().enumerate() {
        let student_id = student_fixture(&registry, &format!("Student {index}"));
        seed_enrollment(&registry, student_id, course_id, grade).await;
    }
    let app = init_app!(state);

    let request = as_professor(actix_test::TestRequest::get())
        .uri(&format!("/api/v1/records/course/{course_id}/distribution"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["courseCode"], "CS101");
    assert_eq!(body["counts"]["A"], 2);
    assert_eq!(body["counts"]["B"], 1);
    assert_eq!(body["counts"]["F"], 1);
    assert_eq!(body["counts"]["C-"], 0);
    assert_eq!(body["gradedCount"], 4);
    assert_eq!(body["pendingCount"], 1);
    assert_eq!(body["percentages"]["A"], 50.0);
    assert_eq!(body["percentages"]["B"], 25.0);
    assert_eq!(body["averageGpa"], 2.75);
}

#[actix_web::test]
async fn distribution_answers_not_found_for_unknown_courses() {
    let (state, _registry) = in_memory_state();
    let app = init_app!(state);

    let request = as_professor(actix_test::TestRequest::get())
        .uri(&format!(
            "/api/v1/records/course/{}/distribution",
            Uuid::new_v4()
        ))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, request).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn roster_joins_student_details_and_embeds_the_distribution() {
    let (state, registry) = in_memory_state();
    let course_id = course_fixture(&registry, "CS101", Some("Dr. Hamilton"));
    let student_id = student_fixture(&registry, "Grace Hopper");
    seed_enrollment(&registry, student_id, course_id, Some(Grade::BPlus)).await;
    let app = init_app!(state);

    let request = as_professor(actix_test::TestRequest::get())
        .uri(&format!("/api/v1/records/course/{course_id}/roster"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["professorName"], "Dr. Hamilton");
    assert_eq!(body["enrolledCount"], 1);
    let students = body["students"].as_array().expect("students");
    assert_eq!(students[0]["studentName"], "Grace Hopper");
    assert_eq!(students[0]["grade"], "B+");
    assert_eq!(body["distribution"]["gradedCount"], 1);
}

#[actix_web::test]
async fn roster_rejects_students() {
    let (state, registry) = in_memory_state();
    let course_id = course_fixture(&registry, "CS101", None);
    let student_id = student_fixture(&registry, "Grace Hopper");
    let app = init_app!(state);

    let request = as_student(actix_test::TestRequest::get(), student_id)
        .uri(&format!("/api/v1/records/course/{course_id}/roster"))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, request).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[actix_web::test]
async fn analytics_respects_the_semester_and_code_filters() {
    let (state, registry) = in_memory_state();
    let tracked = course_fixture(&registry, "CS101", None);
    let other = course_fixture(&registry, "CS201", None);
    let first = student_fixture(&registry, "Grace Hopper");
    let second = student_fixture(&registry, "Ada Lovelace");
    seed_enrollment(&registry, first, tracked, Some(Grade::A)).await;
    seed_enrollment(&registry, second, tracked, Some(Grade::F)).await;
    seed_enrollment(&registry, first, other, Some(Grade::F)).await;
    let app = init_app!(state);

    let request = as_professor(actix_test::TestRequest::get())
        .uri("/api/v1/records/analytics?semester=Fall%202026&courseCode=CS101")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["courseCode"], "CS101");
    assert_eq!(body["gradedCount"], 2);
    // Only the CS101 F counts against the pass rate.
    assert_eq!(body["passRate"], 50.0);
    assert_eq!(body["averageGpa"], 2.0);
}

#[actix_web::test]
async fn analytics_rejects_students() {
    let (state, registry) = in_memory_state();
    let student_id = student_fixture(&registry, "Grace Hopper");
    let app = init_app!(state);

    let request = as_student(actix_test::TestRequest::get(), student_id)
        .uri("/api/v1/records/analytics")
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, request).await.status(),
        StatusCode::FORBIDDEN
    );
}
