//! JSONPlaceholder outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `UserSource` and
//! `CommentSource` ports.

mod dto;
mod http_source;

pub use http_source::JsonPlaceholderHttpSource;
