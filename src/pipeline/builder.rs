//! Builder pattern implementation for creating [`Pipeline`] instances.
//!
//! The [`PipelineConfig`] carries what the configuration file says. The
//! builder carries the knobs that are not part of the file: where the release
//! API lives, how the HTTP client behaves, progress bars, and callbacks.
//!
//! # Examples
//!
//! ```rust
//! use ghdl::pipeline::{PipelineBuilder, PipelineConfig};
//! use ghdl::progress::StyleOptions;
//!
//! # fn example() -> Result<(), ghdl::Error> {
//! let pipeline = PipelineBuilder::new()
//!     .style_options(StyleOptions::default())
//!     .on_complete(|summary| println!("{:?}", summary.status()))
//!     .build(PipelineConfig::default())?;
//! # Ok(())
//! # }
//! ```

use super::config::PipelineConfig;
use super::pipeline::Pipeline;
use crate::download::{AssetDownloader, Summary};
use crate::error::Result;
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::StyleOptions;
use crate::release::{ReleaseFetcher, GITHUB_API};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::error;

/// Callback type for download completion events
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// A builder used to create a [`Pipeline`].
pub struct PipelineBuilder {
    api_base: String,
    http: HttpClientConfig,
    style_options: StyleOptions,
    on_complete: Option<Arc<DownloadCallback>>,
    abort_on_integrity_failure: bool,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self {
            api_base: GITHUB_API.to_string(),
            http: HttpClientConfig::default(),
            style_options: StyleOptions::hidden(),
            on_complete: None,
            abort_on_integrity_failure: false,
        }
    }
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("api_base", &self.api_base)
            .field("http", &self.http)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .field("abort_on_integrity_failure", &self.abort_on_integrity_failure)
            .finish()
    }
}

impl PipelineBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        PipelineBuilder::default()
    }

    /// Sets the base URL of the release API.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the connect and read timeout of every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    /// Route every request through a proxy.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.http.proxy = Some(proxy);
        self
    }

    /// Add a default http header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.http
            .headers
            .get_or_insert_with(HeaderMap::new)
            .insert(name, value);
        self
    }

    /// Set the progress bar style options. Bars are hidden by default.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.style_options = style_options;
        self
    }

    /// Set callback for when each download completes.
    ///
    /// The callback is invoked in completion order, from the task driving the
    /// run, for successful, failed, and cancelled downloads alike.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Cancel the remaining downloads of a run as soon as one download
    /// receives fewer or more bytes than declared.
    pub fn abort_on_integrity_failure(mut self, abort: bool) -> Self {
        self.abort_on_integrity_failure = abort;
        self
    }

    /// Create the [`Pipeline`] for `config`.
    pub fn build(self, config: PipelineConfig) -> Result<Pipeline> {
        let client = create_http_client(self.http)?;
        let fetcher = ReleaseFetcher::new(client.clone(), self.api_base);
        let downloader = AssetDownloader::new(client, config.dir.clone());
        Ok(Pipeline::new(
            config,
            fetcher,
            downloader,
            self.style_options,
            self.on_complete,
            self.abort_on_integrity_failure,
        ))
    }

    /// Validate `value`, build the pipeline and run it.
    ///
    /// An invalid configuration is logged and reported as an unsuccessful run
    /// without touching the network or the filesystem.
    pub async fn run(self, value: &Value, cancel: &CancellationToken) -> Result<bool> {
        let config = match PipelineConfig::from_value(value) {
            Ok(config) => config,
            Err(e) => {
                error!("Config Error: {}", e);
                return Ok(false);
            }
        };
        self.build(config)?.run(cancel).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::USER_AGENT;

    #[test]
    fn test_builder_defaults() {
        let builder = PipelineBuilder::new();
        assert_eq!(builder.api_base, GITHUB_API);
        assert!(!builder.style_options.is_enabled());
        assert!(builder.on_complete.is_none());
        assert!(!builder.abort_on_integrity_failure);
    }

    #[test]
    fn test_builder_headers_merge() {
        let builder = PipelineBuilder::new()
            .header(USER_AGENT, HeaderValue::from_static("agent"))
            .header("x-extra", HeaderValue::from_static("1"));
        let headers = builder.http.headers.as_ref().unwrap();
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn test_builder_debug() {
        let debug_str = format!("{:?}", PipelineBuilder::new().on_complete(|_| {}));
        assert!(debug_str.contains("PipelineBuilder"));
        assert!(debug_str.contains("on_complete: true"));
    }
}
