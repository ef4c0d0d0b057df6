//! ghdl mirrors the assets of the latest GitHub release of a set of
//! repositories into a local directory, driven by a JSON configuration.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use serde_json::json;
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), ghdl::Error> {
//! let config = json!({
//!     "dir": "out",
//!     "repos": [
//!         { "owner": "BurntSushi", "repo": "ripgrep", "filters": [".*x86_64-unknown-linux-musl\\.tar\\.gz"] }
//!     ]
//! });
//! let success = ghdl::run(&config, &CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`pipeline`] - Configuration, builder, and the orchestrating [`Pipeline`]
//! - [`release`] - Latest release retrieval
//! - [`filter`] - Asset patterns, overwrite policy, and clearing of old matches
//! - [`download`] - Streaming, size-verified asset downloads
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client functionality
//! - [`progress`] - Progress bar styling and display management
//! - [`utils`] - Shared utility functions

pub mod download;
pub mod error;
pub mod filter;
pub mod http;
pub mod pipeline;
pub mod progress;
pub mod release;
pub mod utils;

pub use download::{AssetDownloader, DownloadTask, Status, Summary};
pub use error::{ConfigError, DownloadError, Error, FetchError, MatchError, Result};
pub use filter::{clear_matches, match_assets, PatternSet};
pub use http::{create_http_client, HttpClientConfig};
pub use pipeline::{run, Outcome, Phase, Pipeline, PipelineBuilder, PipelineConfig, RepoSpec};
pub use progress::{ProgressBarOpts, ProgressDisplay, StyleOptions};
pub use release::{Asset, Release, ReleaseFetcher};
