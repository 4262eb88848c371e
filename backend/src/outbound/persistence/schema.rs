//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.
//! Regenerate with `diesel print-schema` when migrations change.

diesel::table! {
    /// Student profiles mirrored from the identity collaborator.
    students (id) {
        /// Primary key: UUID shared with the account identity.
        id -> Uuid,
        /// Full display name.
        name -> Varchar,
        /// Unique contact email.
        email -> Varchar,
        /// External registrar code.
        student_code -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Course summaries owned by the catalogue collaborator.
    ///
    /// The enrollment core writes only `available_seats`.
    courses (id) {
        id -> Uuid,
        /// Unique short code such as `CS101`.
        code -> Varchar,
        title -> Varchar,
        /// Term label, for example `Fall 2026`.
        semester -> Varchar,
        capacity -> Int4,
        /// May sit below zero after administrative force-enrolls.
        available_seats -> Int4,
        professor_name -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Enrollment records.
    ///
    /// A unique constraint on `(student_id, course_id)` enforces the
    /// one-active-enrollment invariant at the storage level.
    enrollments (id) {
        id -> Uuid,
        student_id -> Uuid,
        course_id -> Uuid,
        enrolled_at -> Timestamptz,
        /// Letter grade; `NULL` while pending.
        grade -> Nullable<Varchar>,
    }
}

diesel::joinable!(enrollments -> students (student_id));
diesel::joinable!(enrollments -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(courses, enrollments, students);
