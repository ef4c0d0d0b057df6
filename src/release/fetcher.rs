//! Latest release retrieval.
//!
//! A [`ReleaseFetcher`] issues exactly one request per repository. There is no
//! pagination and no retry; the request is bounded by a short timeout so that a
//! fetch in flight always completes or fails on its own.

use super::release::Release;
use crate::error::FetchError;
use crate::http::{client::DEFAULT_TIMEOUT, with_token};

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest_middleware::ClientWithMiddleware;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Base URL of the public GitHub REST API.
pub const GITHUB_API: &str = "https://api.github.com";

/// Fetches the latest release of a repository.
#[derive(Debug, Clone)]
pub struct ReleaseFetcher {
    client: ClientWithMiddleware,
    api_base: String,
    timeout: Duration,
}

impl ReleaseFetcher {
    /// Creates a fetcher talking to `api_base` (for instance [`GITHUB_API`]).
    pub fn new(client: ClientWithMiddleware, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the total request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// URL of the latest release resource of `owner/repo`.
    pub fn latest_release_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}/releases/latest", self.api_base, owner, repo)
    }

    /// Fetches and parses the latest release of `owner/repo`.
    ///
    /// Every failure is logged with the repository identity before being
    /// returned, so callers only need to count it.
    pub async fn fetch_latest(
        &self,
        owner: &str,
        repo: &str,
        token: &str,
    ) -> Result<Release, FetchError> {
        debug!("Start to get latest release of repo \"{}/{}\"", owner, repo);
        match self.request(owner, repo, token).await {
            Ok(release) => {
                info!(
                    "Fetched latest release of repo \"{}/{}\", release name: \"{}\"",
                    owner, repo, release.name
                );
                Ok(release)
            }
            Err(e) => {
                warn!("Failed to get latest release of repo \"{}/{}\": {}", owner, repo, e);
                Err(e)
            }
        }
    }

    async fn request(&self, owner: &str, repo: &str, token: &str) -> Result<Release, FetchError> {
        let req = self
            .client
            .get(self.latest_release_url(owner, repo))
            .header(ACCEPT, HeaderValue::from_static("application/vnd.github+json"))
            .timeout(self.timeout);
        let res = with_token(req, token)?.send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = res.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
