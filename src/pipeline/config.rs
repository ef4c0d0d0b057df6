//! Validated pipeline configuration.
//!
//! The configuration file is JSON. It is parsed once into a [`PipelineConfig`];
//! nothing downstream ever looks at the raw document again.
//!
//! ```json
//! {
//!     "overwrite": true,
//!     "clear_matches": false,
//!     "dir": "out",
//!     "token": "",
//!     "concurrency": 5,
//!     "repos": [
//!         { "owner": "a", "repo": "b", "filters": ["app-.*\\.tar\\.gz"] }
//!     ]
//! }
//! ```
//!
//! A top-level violation rejects the whole configuration. An invalid entry of
//! `repos` is logged and dropped; it still counts as a failure of the run.

use crate::error::ConfigError;
use crate::filter::PatternSet;

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::error;

/// Number of concurrent downloads when the configuration does not say.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// One repository to mirror.
#[derive(Debug, Clone)]
pub struct RepoSpec {
    /// Repository owner, never empty.
    pub owner: String,
    /// Repository name, never empty.
    pub repo: String,
    /// Token for this repository, already resolved against the global token.
    pub token: String,
    /// Asset filters. Empty selects every asset.
    pub patterns: PatternSet,
}

impl RepoSpec {
    /// Validate one entry of `repos`. An empty or absent token falls back to
    /// `global_token`.
    pub fn from_value(value: &Value, global_token: &str) -> Result<Self, ConfigError> {
        let obj = value
            .as_object()
            .ok_or_else(|| ConfigError::InvalidRepo(value.to_string()))?;

        let owner = required_name(obj, "owner")?;
        let repo = required_name(obj, "repo")?;

        let token = optional_str(obj, "token", "")?;
        let token = if token.is_empty() {
            global_token.to_string()
        } else {
            token
        };

        let filters = match obj.get("filters") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().ok_or_else(|| ConfigError::InvalidField {
                        field: "filter",
                        expected: "a string",
                        value: item.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(ConfigError::InvalidField {
                    field: "filters",
                    expected: "a list",
                    value: other.to_string(),
                })
            }
        };

        Ok(Self {
            owner,
            repo,
            token,
            patterns: PatternSet::new(filters)?,
        })
    }

    /// `owner/repo`, for logs.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Configuration of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Replace existing regular files.
    pub overwrite: bool,
    /// Delete local files matching a repository's filters before fetching it.
    pub clear_matches: bool,
    /// Download directory.
    pub dir: PathBuf,
    /// Global fallback token.
    pub token: String,
    /// Maximum concurrent downloads, `0` runs everything sequentially.
    pub concurrency: usize,
    /// Valid repository entries, in configuration order.
    pub repos: Vec<RepoSpec>,
    /// Number of `repos` entries that were dropped during validation.
    pub rejected_repos: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            overwrite: true,
            clear_matches: false,
            dir: PathBuf::from("."),
            token: String::new(),
            concurrency: DEFAULT_CONCURRENCY,
            repos: Vec::new(),
            rejected_repos: 0,
        }
    }
}

impl PipelineConfig {
    /// Validate a parsed configuration document.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let obj = value.as_object().ok_or(ConfigError::NotAnObject)?;
        let defaults = PipelineConfig::default();

        let overwrite = optional_bool(obj, "overwrite", defaults.overwrite)?;
        let clear_matches = optional_bool(obj, "clear_matches", defaults.clear_matches)?;
        let dir = optional_str(obj, "dir", "")?;
        let token = optional_str(obj, "token", "")?;

        let concurrency = match obj.get("concurrency") {
            None => defaults.concurrency,
            Some(v) => v
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| ConfigError::InvalidField {
                    field: "concurrency",
                    expected: "an integer greater than or equal to 0",
                    value: v.to_string(),
                })?,
        };

        let entries = match obj.get("repos") {
            None => {
                return Err(ConfigError::Missing {
                    field: "repos",
                    context: "",
                })
            }
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(ConfigError::InvalidField {
                    field: "repos",
                    expected: "a list",
                    value: other.to_string(),
                })
            }
        };

        let mut repos = Vec::with_capacity(entries.len());
        let mut rejected_repos = 0;
        for entry in entries {
            match RepoSpec::from_value(entry, &token) {
                Ok(spec) => repos.push(spec),
                Err(e) => {
                    error!("Config Error: {}", e);
                    rejected_repos += 1;
                }
            }
        }

        Ok(Self {
            overwrite,
            clear_matches,
            dir: if dir.is_empty() {
                defaults.dir
            } else {
                PathBuf::from(dir)
            },
            token,
            concurrency,
            repos,
            rejected_repos,
        })
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(&value)
    }

    /// `true` when the configuration lists no repository at all.
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty() && self.rejected_repos == 0
    }
}

fn optional_bool(obj: &Map<String, Value>, field: &'static str, default: bool) -> Result<bool, ConfigError> {
    match obj.get(field) {
        None => Ok(default),
        Some(v) => v.as_bool().ok_or_else(|| ConfigError::InvalidField {
            field,
            expected: "a boolean",
            value: v.to_string(),
        }),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &'static str, default: &str) -> Result<String, ConfigError> {
    match obj.get(field) {
        None => Ok(default.to_string()),
        Some(v) => v
            .as_str()
            .map(String::from)
            .ok_or_else(|| ConfigError::InvalidField {
                field,
                expected: "a string",
                value: v.to_string(),
            }),
    }
}

fn required_name(obj: &Map<String, Value>, field: &'static str) -> Result<String, ConfigError> {
    match obj.get(field) {
        None => Err(ConfigError::Missing {
            field,
            context: " in a repo config",
        }),
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(v) => Err(ConfigError::InvalidField {
            field,
            expected: "a non-empty string",
            value: v.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::from_value(&json!({"repos": []})).unwrap();
        assert!(config.overwrite);
        assert!(!config.clear_matches);
        assert_eq!(config.dir, PathBuf::from("."));
        assert_eq!(config.token, "");
        assert_eq!(config.concurrency, 5);
        assert!(config.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = PipelineConfig::from_value(&json!({
            "overwrite": false,
            "clear_matches": true,
            "dir": "out",
            "token": "global",
            "concurrency": 0,
            "repos": [
                {"owner": "a", "repo": "b", "filters": ["app-.*\\.tar\\.gz"]},
                {"owner": "c", "repo": "d", "token": "own"}
            ]
        }))
        .unwrap();

        assert!(!config.overwrite);
        assert!(config.clear_matches);
        assert_eq!(config.dir, PathBuf::from("out"));
        assert_eq!(config.concurrency, 0);
        assert_eq!(config.repos.len(), 2);
        assert_eq!(config.repos[0].slug(), "a/b");
        assert_eq!(config.repos[0].token, "global");
        assert_eq!(config.repos[0].patterns.len(), 1);
        assert_eq!(config.repos[1].token, "own");
        assert!(config.repos[1].patterns.is_empty());
    }

    #[test]
    fn test_not_an_object() {
        assert!(matches!(
            PipelineConfig::from_value(&json!([1, 2])),
            Err(ConfigError::NotAnObject)
        ));
    }

    #[test]
    fn test_repos_required() {
        let err = PipelineConfig::from_value(&json!({"dir": "out"})).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { field: "repos", .. }));
        assert_eq!(err.to_string(), "\"repos\" is required");
    }

    #[test]
    fn test_repos_must_be_a_list() {
        let err = PipelineConfig::from_value(&json!({"repos": {"owner": "a"}})).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidField { field: "repos", .. }));
    }

    #[test]
    fn test_mistyped_fields() {
        for (doc, field) in [
            (json!({"repos": [], "overwrite": "yes"}), "overwrite"),
            (json!({"repos": [], "clear_matches": 1}), "clear_matches"),
            (json!({"repos": [], "dir": 3}), "dir"),
            (json!({"repos": [], "token": null}), "token"),
            (json!({"repos": [], "concurrency": -1}), "concurrency"),
            (json!({"repos": [], "concurrency": 2.5}), "concurrency"),
            (json!({"repos": [], "concurrency": true}), "concurrency"),
        ] {
            match PipelineConfig::from_value(&doc) {
                Err(ConfigError::InvalidField { field: f, .. }) => assert_eq!(f, field),
                other => panic!("{doc}: unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_repo_entries_are_dropped() {
        let config = PipelineConfig::from_value(&json!({
            "repos": [
                "a/b",
                {"repo": "b"},
                {"owner": "", "repo": "b"},
                {"owner": "a", "repo": "b", "filters": "x"},
                {"owner": "a", "repo": "b", "filters": [1]},
                {"owner": "a", "repo": "b", "filters": ["("]},
                {"owner": "a", "repo": "b", "token": 5},
                {"owner": "ok", "repo": "ok"}
            ]
        }))
        .unwrap();

        assert_eq!(config.rejected_repos, 7);
        assert_eq!(config.repos.len(), 1);
        assert_eq!(config.repos[0].slug(), "ok/ok");
        assert!(!config.is_empty());
    }

    #[test]
    fn test_repo_missing_owner_message() {
        let err = RepoSpec::from_value(&json!({"repo": "b"}), "").unwrap_err();
        assert_eq!(err.to_string(), "\"owner\" is required in a repo config");
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"repos": [{"owner": "a", "repo": "b"}]}"#).unwrap();
        let config = PipelineConfig::from_path(&path).unwrap();
        assert_eq!(config.repos.len(), 1);

        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            PipelineConfig::from_path(&path),
            Err(ConfigError::Json { .. })
        ));
        assert!(matches!(
            PipelineConfig::from_path(dir.path().join("missing.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
