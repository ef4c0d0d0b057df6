//! Release module containing release metadata retrieval.
//!
//! - [`release`] - Release and asset descriptors
//! - [`fetcher`] - The [`ReleaseFetcher`] querying the latest release endpoint
//!
//! # Examples
//!
//! ```rust,no_run
//! use ghdl::http::{create_http_client, HttpClientConfig};
//! use ghdl::release::{ReleaseFetcher, GITHUB_API};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let fetcher = ReleaseFetcher::new(client, GITHUB_API);
//! let release = fetcher.fetch_latest("rust-lang", "rust-analyzer", "").await?;
//! for asset in &release.assets {
//!     println!("{} -> {}", asset.name, asset.download_url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod fetcher;
pub mod release;

pub use fetcher::{ReleaseFetcher, GITHUB_API};
pub use release::{Asset, Release};
