//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **jsonplaceholder**: reqwest client for the remote user and comment API
//! - **notifications**: tracing-backed notification sink
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic.

pub mod jsonplaceholder;
pub mod notifications;
