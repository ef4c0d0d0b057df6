//! Removal of previously downloaded files matching a pattern set.

use super::pattern::PatternSet;

use std::path::Path;
use tokio::fs;
use tracing::{error, info, warn};

/// Delete the regular files directly inside `dir` whose name fully matches
/// one of `patterns`.
///
/// A matching entry that is not a regular file, or that cannot be inspected
/// or removed, makes the sweep fail without stopping it. Only a failure to
/// list `dir` itself stops early. An empty pattern set removes nothing.
pub async fn clear_matches(dir: &Path, patterns: &PatternSet) -> bool {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Clear matches: cannot read directory {:?}: {}", dir, e);
            return false;
        }
    };

    let mut success = true;
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(e) => {
                warn!("Clear matches: cannot read entry of {:?}: {}", dir, e);
                success = false;
                break;
            }
        };

        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !patterns.full_match(&name) {
            continue;
        }

        let path = entry.path();
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {
                info!("Clear matches: deleting file \"{}\"", name);
                if let Err(e) = fs::remove_file(&path).await {
                    success = false;
                    warn!("Clear matches: cannot delete \"{}\": {}", name, e);
                }
            }
            Ok(_) => {
                success = false;
                warn!("Clear matches: \"{}\" is not a regular file", name);
            }
            Err(e) => {
                success = false;
                warn!("Clear matches: cannot inspect \"{}\": {}", name, e);
            }
        }
    }
    success
}
