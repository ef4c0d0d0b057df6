//! HTTP client setup and middleware configuration.
//!
//! The client is shared by the release fetcher and the asset downloader. It is
//! wrapped in `reqwest_middleware` with request tracing. There is
//! no retry layer: a failed request is reported once and counted as a failure.
//!
//! # Examples
//!
//! ```rust
//! use ghdl::http::{create_http_client, HttpClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! # Ok(())
//! # }
//! ```

use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION, USER_AGENT},
    Proxy,
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Connect and read timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// User agent sent with every request. The GitHub API rejects anonymous agents.
pub const DEFAULT_USER_AGENT: &str = concat!("ghdl/", env!("CARGO_PKG_VERSION"));

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Connect and read timeout.
    pub timeout: Duration,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            headers: None,
        }
    }
}

/// Creates an HTTP client with tracing middleware.
///
/// The inner client gets the configured connect and read timeouts, the
/// optional proxy, and the default headers. A `User-Agent` is always set,
/// unless the provided headers already carry one.
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut headers = config.headers.unwrap_or_default();
    if !headers.contains_key(USER_AGENT) {
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    }

    let mut inner_client_builder = reqwest::Client::builder()
        .connect_timeout(config.timeout)
        .read_timeout(config.timeout)
        .default_headers(headers);

    if let Some(proxy) = config.proxy {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        // Trace HTTP requests. See the tracing crate to make use of these traces.
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}

/// Attaches a bearer token to the request, if the token is not empty.
pub fn with_token(
    request: RequestBuilder,
    token: &str,
) -> Result<RequestBuilder, InvalidHeaderValue> {
    if token.is_empty() {
        return Ok(request);
    }
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
    value.set_sensitive(true);
    Ok(request.header(AUTHORIZATION, value))
}
