//! Outbound adapters implementing domain ports against external services.
//!
//! - **notification_counts**: reqwest client for the badge count feeds.
//! - **principals**: reqwest client for sign-in and principal lookups.
//!
//! Adapters translate between wire formats and domain types; they hold no
//! business rules.

pub mod notification_counts;
pub mod principals;
