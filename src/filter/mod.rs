//! Filter module deciding which assets end up on disk.
//!
//! - [`pattern`] - Full-match filename patterns
//! - [`matcher`] - Selection of release assets and overwrite policy
//! - [`clear`] - Removal of local files matching a pattern set
//!
//! # Examples
//!
//! ```rust
//! use ghdl::filter::PatternSet;
//!
//! let patterns = PatternSet::new([r"app-.*\.tar\.gz"])?;
//! assert!(patterns.selects("app-linux.tar.gz"));
//! assert!(!patterns.selects("app.sig"));
//! # Ok::<(), ghdl::error::ConfigError>(())
//! ```

pub mod clear;
pub mod matcher;
pub mod pattern;

pub use clear::clear_matches;
pub use matcher::{decide, match_assets, Decision};
pub use pattern::PatternSet;
