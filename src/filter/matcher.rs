//! Asset selection and overwrite policy.
//!
//! Turns one [`Release`] into [`DownloadTask`]s. Every decision is taken from
//! the release, the pattern set and the filesystem state at the time of the
//! call; a queued task is never revisited.

use super::pattern::PatternSet;
use crate::download::DownloadTask;
use crate::error::MatchError;
use crate::release::{Asset, Release};

use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

/// What to do with a single selected asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Queue the download; `overwrite` is set when a regular file is replaced.
    Download { overwrite: bool },
    /// The file exists and overwriting is disabled.
    Skip,
}

/// Decide whether `filename` should be downloaded into `dir`.
pub async fn decide(dir: &Path, filename: &str, overwrite: bool) -> Result<Decision, MatchError> {
    let path = dir.join(filename);
    let metadata = match fs::metadata(&path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Ok(Decision::Download { overwrite: false })
        }
        Err(source) => return Err(MatchError::Io { path, source }),
    };

    if !overwrite {
        Ok(Decision::Skip)
    } else if metadata.is_file() {
        Ok(Decision::Download { overwrite: true })
    } else {
        Err(MatchError::NotARegularFile(path))
    }
}

/// Append the download tasks of `release` to `download_list`.
///
/// Returns `false` if any selected asset could not be decided. A failure on
/// one asset does not prevent the remaining assets from being processed.
pub async fn match_assets(
    release: &Release,
    token: &str,
    patterns: &PatternSet,
    overwrite: bool,
    dir: &Path,
    download_list: &mut Vec<DownloadTask>,
) -> bool {
    let mut success = true;
    for asset in &release.assets {
        success &= match_asset(asset, token, patterns, overwrite, dir, download_list).await;
    }
    success
}

async fn match_asset(
    asset: &Asset,
    token: &str,
    patterns: &PatternSet,
    overwrite: bool,
    dir: &Path,
    download_list: &mut Vec<DownloadTask>,
) -> bool {
    if !patterns.selects(&asset.name) {
        debug!("Filtered out: \"{}\"", asset.name);
        return true;
    }

    match decide(dir, &asset.name, overwrite).await {
        Ok(Decision::Download { overwrite }) => {
            if overwrite {
                info!("Overwrite file: \"{}\"", asset.name);
            }
            download_list.push(DownloadTask::new(&asset.download_url, &asset.name, token));
            true
        }
        Ok(Decision::Skip) => {
            info!("File exists, skipped: \"{}\"", asset.name);
            true
        }
        Err(e) => {
            warn!("Cannot queue \"{}\": {}", asset.name, e);
            false
        }
    }
}
