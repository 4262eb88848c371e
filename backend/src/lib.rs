//! University course-management backend.
//!
//! The enrollment and grading engine at the core is hexagonal: the domain
//! owns the entities, grade scale, and services; inbound HTTP adapters and
//! outbound persistence adapters plug into its ports. See the module docs of
//! [`domain`], [`inbound`], and [`outbound`] for the layer boundaries.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
