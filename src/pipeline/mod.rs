//! Pipeline module orchestrating a whole mirroring run.
//!
//! - `config` - The validated [`PipelineConfig`] and its [`RepoSpec`] entries
//! - `builder` - [`PipelineBuilder`] for the settings that are not part of the config file
//! - `pipeline` - The [`Pipeline`] driving the fetch and download phases
//! - `outcome` - The [`Outcome`] collecting the result of every unit of work
//!
//! # Examples
//!
//! ```rust,no_run
//! use ghdl::pipeline::{PipelineBuilder, PipelineConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PipelineConfig::from_path("ghdl.json")?;
//! let pipeline = PipelineBuilder::new().build(config)?;
//!
//! let cancel = CancellationToken::new();
//! let success = pipeline.run(&cancel).await?;
//! println!("success: {}", success);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod outcome;
pub mod pipeline;

pub use builder::{DownloadCallback, PipelineBuilder};
pub use config::{PipelineConfig, RepoSpec, DEFAULT_CONCURRENCY};
pub use outcome::{Outcome, Phase};
pub use pipeline::Pipeline;

use crate::error::Result;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Validate `config` and run a pipeline with the default builder settings.
pub async fn run(config: &Value, cancel: &CancellationToken) -> Result<bool> {
    PipelineBuilder::new().run(config, cancel).await
}
