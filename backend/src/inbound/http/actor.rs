//! Trusted-identity extractor.
//!
//! Authentication happens upstream; the gateway forwards the resolved caller
//! as `X-Actor-Role` / `X-Actor-Id` headers. This extractor parses that pair
//! into a domain [`Actor`] without doing any authentication of its own.
//! Malformed headers are treated the same as absent ones, so handlers that
//! call [`ActorContext::require`] answer 401 either way.

use std::future::{Ready, ready};

use actix_web::http::header::HeaderMap;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Actor, Error, StudentId};

/// Header carrying the caller's role: `student`, `professor`, or `admin`.
pub const ACTOR_ROLE_HEADER: &str = "X-Actor-Role";
/// Header carrying the caller's profile id as a UUID.
pub const ACTOR_ID_HEADER: &str = "X-Actor-Id";

fn parse_actor(headers: &HeaderMap) -> Option<Actor> {
    let role = headers.get(ACTOR_ROLE_HEADER)?.to_str().ok()?;
    let id = headers.get(ACTOR_ID_HEADER)?.to_str().ok()?;
    let id = match Uuid::parse_str(id.trim()) {
        Ok(id) => id,
        Err(_) => {
            warn!(header = ACTOR_ID_HEADER, "actor id header is not a UUID");
            return None;
        }
    };
    match role.trim().to_ascii_lowercase().as_str() {
        "student" => Some(Actor::Student {
            student_id: StudentId::new(id),
        }),
        "professor" => Some(Actor::Professor { professor_id: id }),
        "admin" => Some(Actor::Admin { admin_id: id }),
        other => {
            warn!(role = other, "unrecognised actor role header");
            None
        }
    }
}

/// Resolved caller identity for the current request, if any.
#[derive(Debug, Clone)]
pub struct ActorContext {
    actor: Option<Actor>,
}

impl ActorContext {
    /// The resolved actor, or 401 when the gateway sent no usable identity.
    pub fn require(&self) -> Result<Actor, Error> {
        self.actor
            .ok_or_else(|| Error::unauthorized("no caller identity supplied"))
    }
}

impl FromRequest for ActorContext {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(Self {
            actor: parse_actor(req.headers()),
        }))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    fn context_for(request: TestRequest) -> ActorContext {
        let request = request.to_http_request();
        ActorContext {
            actor: parse_actor(request.headers()),
        }
    }

    #[rstest]
    #[case("student")]
    #[case("Student")]
    #[case("STUDENT")]
    fn student_headers_resolve_case_insensitively(#[case] role: &str) {
        let id = Uuid::new_v4();
        let context = context_for(
            TestRequest::default()
                .insert_header((ACTOR_ROLE_HEADER, role))
                .insert_header((ACTOR_ID_HEADER, id.to_string())),
        );
        let actor = context.require().expect("actor resolves");
        assert_eq!(
            actor,
            Actor::Student {
                student_id: StudentId::new(id)
            }
        );
    }

    #[rstest]
    #[case("professor", "professor")]
    #[case("admin", "admin")]
    fn staff_roles_resolve(#[case] role: &str, #[case] expected: &str) {
        let context = context_for(
            TestRequest::default()
                .insert_header((ACTOR_ROLE_HEADER, role))
                .insert_header((ACTOR_ID_HEADER, Uuid::new_v4().to_string())),
        );
        let actor = context.require().expect("actor resolves");
        assert_eq!(actor.role_name(), expected);
    }

    #[rstest]
    fn missing_headers_yield_unauthorized() {
        let context = context_for(TestRequest::default());
        let error = context.require().expect_err("unauthorized");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case("registrar", "not-a-role")]
    #[case("student", "not-a-uuid")]
    fn malformed_headers_are_treated_as_absent(#[case] role: &str, #[case] _label: &str) {
        let id = if role == "student" {
            "not-a-uuid".to_owned()
        } else {
            Uuid::new_v4().to_string()
        };
        let context = context_for(
            TestRequest::default()
                .insert_header((ACTOR_ROLE_HEADER, role))
                .insert_header((ACTOR_ID_HEADER, id)),
        );
        assert!(context.require().is_err());
    }
}
