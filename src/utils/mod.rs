//! Shared utility functions.
//!
//! - [`content_length`] - Declared content length extraction from HTTP responses

pub mod content_length;

pub use content_length::{declared_content_length, parse_content_length};
