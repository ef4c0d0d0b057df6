//! Core pipeline implementation.
//!
//! A run goes through the following steps:
//!
//! 1. create the download directory,
//! 2. per repository, optionally clear previous matches, then fetch the
//!    latest release and match its assets into the download list,
//! 3. download every queued asset.
//!
//! With a concurrency of `0` everything runs one unit at a time. Otherwise the
//! fetches run in a group as large as the number of repositories and the
//! downloads in a group bounded by the concurrency. Both groups yield results
//! in completion order and are dropped, cancelling whatever is left, before the
//! run returns.

use super::builder::DownloadCallback;
use super::config::{PipelineConfig, RepoSpec};
use super::outcome::{Outcome, Phase};
use crate::download::{AssetDownloader, DownloadTask, Status, Summary};
use crate::error::{Error, FetchError, Result};
use crate::filter::{clear_matches, match_assets};
use crate::progress::{ProgressDisplay, StyleOptions};
use crate::release::{Release, ReleaseFetcher};

use futures::stream::{self, StreamExt};
use std::fmt;
use std::sync::Arc;
use tokio::fs;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Runs the fetch, match, and download steps for a [`PipelineConfig`].
///
/// A pipeline is created via its builder:
///
/// ```rust
/// use ghdl::pipeline::{PipelineBuilder, PipelineConfig};
///
/// # fn example() -> Result<(), ghdl::Error> {
/// let pipeline = PipelineBuilder::new().build(PipelineConfig::default())?;
/// assert_eq!(pipeline.config().concurrency, 5);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: ReleaseFetcher,
    downloader: AssetDownloader,
    style_options: StyleOptions,
    on_complete: Option<Arc<DownloadCallback>>,
    abort_on_integrity_failure: bool,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("fetcher", &self.fetcher)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .field("abort_on_integrity_failure", &self.abort_on_integrity_failure)
            .finish()
    }
}

impl Pipeline {
    pub(crate) fn new(
        config: PipelineConfig,
        fetcher: ReleaseFetcher,
        downloader: AssetDownloader,
        style_options: StyleOptions,
        on_complete: Option<Arc<DownloadCallback>>,
        abort_on_integrity_failure: bool,
    ) -> Self {
        Self {
            config,
            fetcher,
            downloader,
            style_options,
            on_complete,
            abort_on_integrity_failure,
        }
    }

    /// Gets the validated configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs the pipeline and reduces the outcome to a single success flag.
    ///
    /// Returns [`Error::Interrupted`] if `cancel` fired during the run.
    pub async fn run(&self, cancel: &CancellationToken) -> Result<bool> {
        let outcome = self.execute(cancel).await?;
        if outcome.is_success() {
            info!("Run finished: {}", outcome);
        } else {
            warn!("Run finished with failures: {}", outcome);
        }
        Ok(outcome.is_success())
    }

    /// Runs the pipeline and returns the per-phase outcome.
    pub async fn execute(&self, cancel: &CancellationToken) -> Result<Outcome> {
        let mut outcome = Outcome::new();
        if self.config.is_empty() {
            return Ok(outcome);
        }
        outcome.record_failures(Phase::Config, self.config.rejected_repos);

        if let Err(e) = fs::create_dir_all(&self.config.dir).await {
            error!(
                "Failed to create download directory {:?}: {}",
                self.config.dir, e
            );
            outcome.record(Phase::Prepare, false);
            return Ok(outcome);
        }
        outcome.record(Phase::Prepare, true);

        if self.config.concurrency == 0 {
            let download_list = self.collect_sequential(cancel, &mut outcome).await?;
            self.download_sequential(&download_list, cancel, &mut outcome)
                .await?;
        } else {
            let download_list = self.collect_pooled(cancel, &mut outcome).await?;
            self.download_pooled(&download_list, cancel, &mut outcome)
                .await?;
        }
        Ok(outcome)
    }

    /// Fetches and matches one repository at a time. An interrupt aborts the
    /// fetch in flight.
    async fn collect_sequential(
        &self,
        cancel: &CancellationToken,
        outcome: &mut Outcome,
    ) -> Result<Vec<DownloadTask>> {
        let mut download_list = Vec::new();
        for spec in &self.config.repos {
            if cancel.is_cancelled() {
                return Err(Error::Interrupted);
            }
            self.clear(spec, outcome).await;

            let fetched = tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(FetchError::Interrupted),
                fetched = self.fetcher.fetch_latest(&spec.owner, &spec.repo, &spec.token) => fetched,
            };
            if let Err(FetchError::Interrupted) = fetched {
                warn!("Interrupted while fetching repo \"{}\"", spec.slug());
                return Err(Error::Interrupted);
            }
            self.accept(spec, fetched, &mut download_list, outcome)
                .await;
        }
        Ok(download_list)
    }

    /// Fetches every repository at once and matches releases as they arrive.
    ///
    /// Fetches in flight are not interrupted; they finish within their
    /// timeout, after which the interrupt is reported.
    async fn collect_pooled(
        &self,
        cancel: &CancellationToken,
        outcome: &mut Outcome,
    ) -> Result<Vec<DownloadTask>> {
        for spec in &self.config.repos {
            if cancel.is_cancelled() {
                return Err(Error::Interrupted);
            }
            self.clear(spec, outcome).await;
        }

        let mut fetches = stream::iter(&self.config.repos)
            .map(|spec| async move {
                let fetched = self
                    .fetcher
                    .fetch_latest(&spec.owner, &spec.repo, &spec.token)
                    .await;
                (spec, fetched)
            })
            .buffer_unordered(self.config.repos.len().max(1));

        let mut download_list = Vec::new();
        while let Some((spec, fetched)) = fetches.next().await {
            if cancel.is_cancelled() {
                debug!("Discarding release of repo \"{}\" after interrupt", spec.slug());
                continue;
            }
            self.accept(spec, fetched, &mut download_list, outcome)
                .await;
        }

        if cancel.is_cancelled() {
            return Err(Error::Interrupted);
        }
        Ok(download_list)
    }

    /// Downloads one asset at a time.
    async fn download_sequential(
        &self,
        download_list: &[DownloadTask],
        cancel: &CancellationToken,
        outcome: &mut Outcome,
    ) -> Result<()> {
        let run_token = cancel.child_token();
        let progress = ProgressDisplay::new(self.style_options.clone(), download_list.len());
        // Tasks left after an interrupt are reported as cancelled, not started.
        for task in download_list {
            let summary = self.downloader.download(task, &run_token, &progress).await;
            self.complete(&summary, &run_token, outcome);
        }
        progress.finish();

        if cancel.is_cancelled() {
            return Err(Error::Interrupted);
        }
        Ok(())
    }

    /// Downloads up to `concurrency` assets at once.
    async fn download_pooled(
        &self,
        download_list: &[DownloadTask],
        cancel: &CancellationToken,
        outcome: &mut Outcome,
    ) -> Result<()> {
        let run_token = cancel.child_token();
        let progress = ProgressDisplay::new(self.style_options.clone(), download_list.len());

        let mut downloads = stream::iter(download_list)
            .map(|task| self.downloader.download(task, &run_token, &progress))
            .buffer_unordered(self.config.concurrency);
        while let Some(summary) = downloads.next().await {
            self.complete(&summary, &run_token, outcome);
        }
        drop(downloads);
        progress.finish();

        if cancel.is_cancelled() {
            return Err(Error::Interrupted);
        }
        Ok(())
    }

    async fn clear(&self, spec: &RepoSpec, outcome: &mut Outcome) {
        if self.config.clear_matches {
            debug!("Clearing matches of repo \"{}\"", spec.slug());
            let cleared = clear_matches(&self.config.dir, &spec.patterns).await;
            outcome.record(Phase::Clear, cleared);
        }
    }

    /// Records a fetch result and matches the release, if any.
    async fn accept(
        &self,
        spec: &RepoSpec,
        fetched: std::result::Result<Release, FetchError>,
        download_list: &mut Vec<DownloadTask>,
        outcome: &mut Outcome,
    ) {
        let release = match fetched {
            Ok(release) => release,
            Err(_) => {
                outcome.record(Phase::Fetch, false);
                return;
            }
        };
        outcome.record(Phase::Fetch, true);

        let matched = match_assets(
            &release,
            &spec.token,
            &spec.patterns,
            self.config.overwrite,
            &self.config.dir,
            download_list,
        )
        .await;
        outcome.record(Phase::Match, matched);
    }

    /// Records a finished download.
    fn complete(&self, summary: &Summary, run_token: &CancellationToken, outcome: &mut Outcome) {
        if self.abort_on_integrity_failure && !run_token.is_cancelled() {
            if let Status::SizeMismatch { .. } = summary.status() {
                warn!(
                    "Integrity check failed for \"{}\", cancelling remaining downloads",
                    summary.task().filename
                );
                run_token.cancel();
            }
        }

        if let Some(ref callback) = self.on_complete {
            callback(summary);
        }
        outcome.record(Phase::Download, summary.is_success());
    }
}
