//! Navigation visibility and role resolution for the staff portal.
//!
//! The `domain` module holds the pure decisions (access predicate,
//! visibility filter, badges, route guard); `inbound` exposes them over
//! HTTP and `outbound` fetches notification counts.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
