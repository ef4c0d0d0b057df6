//! Download tasks queued by the asset matcher.

use std::path::{Path, PathBuf};

/// Represents an asset to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// URL of the asset.
    pub url: String,
    /// File name used to save the asset, relative to the download directory.
    pub filename: String,
    /// Bearer token sent with the request, empty for anonymous access.
    pub token: String,
}

impl DownloadTask {
    /// Creates a new [`DownloadTask`].
    pub fn new(url: impl Into<String>, filename: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            token: token.into(),
        }
    }

    /// Destination of the asset inside `dir`.
    pub fn destination(&self, dir: &Path) -> PathBuf {
        dir.join(&self.filename)
    }
}
