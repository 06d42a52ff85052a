//! In-memory user directory with a JSON-over-HTTP adapter.
//!
//! The [`domain`] module owns user records and the [`domain::ports::UserDirectory`]
//! port; [`inbound::http`] maps that port onto REST endpoints.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::trace::Trace;
