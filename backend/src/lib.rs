//! Shelter directory and evacuation advice backend.
//!
//! Layers follow a ports-and-adapters split: `domain` holds the model,
//! services and port traits; `inbound` exposes them over HTTP; `outbound`
//! implements storage and credential adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
