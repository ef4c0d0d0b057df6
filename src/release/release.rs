//! Release metadata as returned by the "latest release" endpoint.
//!
//! Only the fields the pipeline consumes are deserialized; everything else in
//! the response is ignored.

use serde::Deserialize;

/// The latest release of a repository.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Release name. GitHub reports `null` for releases without a title.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Downloadable files attached to the release.
    pub assets: Vec<Asset>,
}

/// A single downloadable file attached to a [`Release`].
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// File name, used verbatim as the name on disk.
    pub name: String,
    /// Public download URL.
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
