//! Student profile read model.
//!
//! Student accounts are owned by the identity collaborator; the enrollment
//! core only reads the profile fields it needs for transcripts and rosters.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Identifier of a student profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Wrap an existing identifier.
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A student as seen by the enrollment core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Profile identifier, 1:1 with an account identity.
    pub id: StudentId,
    /// Full display name.
    pub name: String,
    /// Unique contact email.
    pub email: String,
    /// External registrar code (for example `STU-2026-0042`).
    pub student_code: String,
}
