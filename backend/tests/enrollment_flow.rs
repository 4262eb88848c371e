//! End-to-end enrollment flows over the HTTP surface with the in-memory
//! registry wired behind the real engine.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use ucms_backend::domain::{CourseId, CourseSummary, Student, StudentId};
use ucms_backend::inbound::http::actor::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
use ucms_backend::outbound::persistence::InMemoryRegistry;
use ucms_backend::server::{configure_api, in_memory_state};

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

fn seed_student(registry: &Arc<InMemoryRegistry>, name: &str) -> StudentId {
    let id = StudentId::random();
    registry.insert_student(Student {
        id,
        name: name.to_owned(),
        email: format!("{}@example.edu", name.to_ascii_lowercase().replace(' ', ".")),
        student_code: format!("STU-{id}"),
    });
    id
}

fn seed_course(registry: &Arc<InMemoryRegistry>, code: &str, seats: i32) -> CourseId {
    let id = CourseId::random();
    registry.insert_course(CourseSummary {
        id,
        code: code.to_owned(),
        title: format!("{code} lectures"),
        semester: "Fall 2026".to_owned(),
        capacity: seats,
        available_seats: seats,
        professor_name: Some("Dr. Hamilton".to_owned()),
    });
    id
}

fn as_role(
    request: actix_test::TestRequest,
    role: &str,
    actor_id: impl std::fmt::Display,
) -> actix_test::TestRequest {
    request
        .insert_header((ACTOR_ROLE_HEADER, role))
        .insert_header((ACTOR_ID_HEADER, actor_id.to_string()))
}

#[actix_web::test]
async fn enrollment_lifecycle_round_trips_through_grading_and_drop() {
    let (state, registry) = in_memory_state();
    let student_id = seed_student(&registry, "Ada Lovelace");
    let course_id = seed_course(&registry, "CS101", 30);
    let app = init_app!(state);

    // Enroll.
    let request = as_role(actix_test::TestRequest::post(), "student", student_id)
        .uri("/api/v1/enrollments")
        .set_json(json!({ "courseId": course_id }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    let enrollment_id = body["enrollmentId"].as_str().expect("id").to_owned();
    assert_eq!(registry.course(course_id).expect("course").available_seats, 29);

    // A second attempt is rejected without burning a seat.
    let request = as_role(actix_test::TestRequest::post(), "student", student_id)
        .uri("/api/v1/enrollments")
        .set_json(json!({ "courseId": course_id }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(registry.course(course_id).expect("course").available_seats, 29);

    // Grade it.
    let request = as_role(actix_test::TestRequest::put(), "professor", Uuid::new_v4())
        .uri(&format!("/api/v1/enrollments/{enrollment_id}/grade"))
        .set_json(json!({ "grade": "A+" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The transcript reflects the grade.
    let request = as_role(actix_test::TestRequest::get(), "student", student_id)
        .uri("/api/v1/records/transcript")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["gpa"], 4.0);
    assert_eq!(body["entries"][0]["grade"], "A+");

    // Dropping restores the seat.
    let request = as_role(actix_test::TestRequest::delete(), "student", student_id)
        .uri(&format!("/api/v1/enrollments/{course_id}"))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(registry.course(course_id).expect("course").available_seats, 30);
}

#[actix_web::test]
async fn forced_enrollment_bypasses_an_exhausted_course() {
    let (state, registry) = in_memory_state();
    let first = seed_student(&registry, "Ada Lovelace");
    let second = seed_student(&registry, "Grace Hopper");
    let course_id = seed_course(&registry, "CS101", 1);
    let app = init_app!(state);

    let request = as_role(actix_test::TestRequest::post(), "student", first)
        .uri("/api/v1/enrollments")
        .set_json(json!({ "courseId": course_id }))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, request).await.status(),
        StatusCode::CREATED
    );

    let request = as_role(actix_test::TestRequest::post(), "student", second)
        .uri("/api/v1/enrollments")
        .set_json(json!({ "courseId": course_id }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "capacity_exhausted");

    let request = as_role(actix_test::TestRequest::post(), "admin", Uuid::new_v4())
        .uri("/api/v1/enrollments/force")
        .set_json(json!({
            "studentId": second,
            "courseId": course_id,
            "reason": "graduation requirement"
        }))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, request).await.status(),
        StatusCode::CREATED
    );
    assert_eq!(registry.course(course_id).expect("course").available_seats, -1);

    let request = as_role(actix_test::TestRequest::delete(), "admin", Uuid::new_v4())
        .uri(&format!(
            "/api/v1/enrollments/force/{second}/{course_id}?reason=withdrawal"
        ))
        .to_request();
    assert_eq!(
        actix_test::call_service(&app, request).await.status(),
        StatusCode::NO_CONTENT
    );
    assert_eq!(registry.course(course_id).expect("course").available_seats, 0);
}

#[actix_web::test]
async fn concurrent_enrollments_take_the_last_seat_exactly_once() {
    let (state, registry) = in_memory_state();
    let first = seed_student(&registry, "Ada Lovelace");
    let second = seed_student(&registry, "Grace Hopper");
    let course_id = seed_course(&registry, "CS101", 1);
    let app = init_app!(state);

    let requests = [first, second].map(|student_id| {
        as_role(actix_test::TestRequest::post(), "student", student_id)
            .uri("/api/v1/enrollments")
            .set_json(json!({ "courseId": course_id }))
            .to_request()
    });
    let [left, right] = requests;
    let (first_response, second_response) = futures::join!(
        actix_test::call_service(&app, left),
        actix_test::call_service(&app, right)
    );

    let statuses = [first_response.status(), second_response.status()];
    assert_eq!(
        statuses
            .iter()
            .filter(|status| **status == StatusCode::CREATED)
            .count(),
        1,
        "exactly one enrollment may win the last seat: {statuses:?}"
    );
    assert_eq!(
        statuses
            .iter()
            .filter(|status| **status == StatusCode::CONFLICT)
            .count(),
        1
    );
    assert_eq!(registry.course(course_id).expect("course").available_seats, 0);
}
