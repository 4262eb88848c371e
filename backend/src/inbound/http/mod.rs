//! HTTP inbound adapter exposing REST endpoints.

pub mod actor;
pub mod enrollments;
pub mod error;
pub mod health;
pub mod records;
pub mod state;

pub use error::ApiResult;
