//! HTTP module containing HTTP client functionality.
//!
//! This module provides the HTTP client shared by release fetches and asset
//! downloads: timeouts, tracing middleware, default headers, and bearer token
//! handling.
//!
//! - [`client`] - HTTP client creation and middleware configuration

pub mod client;

pub use client::{create_http_client, with_token, HttpClientConfig};
