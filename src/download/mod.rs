//! Download module containing asset download functionality.
//!
//! - [`task`] - The [`DownloadTask`] produced by the asset matcher
//! - [`downloader`] - The [`AssetDownloader`] streaming assets to disk
//! - [`summary`] - Download result tracking and status reporting
//!
//! # Examples
//!
//! ```rust,no_run
//! use ghdl::download::{AssetDownloader, DownloadTask};
//! use ghdl::http::{create_http_client, HttpClientConfig};
//! use ghdl::progress::ProgressDisplay;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let downloader = AssetDownloader::new(client, "downloads");
//! let task = DownloadTask::new("https://example.com/app.tar.gz", "app.tar.gz", "");
//!
//! let summary = downloader
//!     .download(&task, &CancellationToken::new(), &ProgressDisplay::hidden())
//!     .await;
//! println!("{}: {:?}", summary.task().filename, summary.status());
//! # Ok(())
//! # }
//! ```

pub mod downloader;
pub mod summary;
pub mod task;

pub use downloader::AssetDownloader;
pub use summary::{Status, Summary};
pub use task::DownloadTask;
