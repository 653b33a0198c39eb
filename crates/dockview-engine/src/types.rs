//! Records returned by the Docker Engine API

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Container ID wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContainerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Image ID wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageId(pub String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ImageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Abbreviate a full hex ID (optionally `sha256:` prefixed) to 12 characters.
/// Names and short IDs are returned as given.
pub fn short_id(id: &str) -> &str {
    let hex = id.strip_prefix("sha256:").unwrap_or(id);
    if hex.len() > 12 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        &hex[..12]
    } else {
        id
    }
}

/// The Engine encodes nil Go slices and maps as `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Entry of `GET /containers/json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerSummary {
    pub id: ContainerId,
    #[serde(deserialize_with = "null_as_default")]
    pub names: Vec<String>,
    pub image: String,
    #[serde(rename = "ImageID")]
    pub image_id: String,
    pub command: String,
    pub created: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub ports: Vec<SummaryPort>,
    #[serde(deserialize_with = "null_as_default")]
    pub labels: HashMap<String, String>,
    pub state: String,
    pub status: String,
}

impl ContainerSummary {
    /// First name without the leading `/`
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .map(|n| n.strip_prefix('/').unwrap_or(n))
            .unwrap_or_default()
    }
}

/// Port as reported in a container summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SummaryPort {
    #[serde(rename = "IP")]
    pub ip: Option<String>,
    pub private_port: u16,
    pub public_port: Option<u16>,
    #[serde(rename = "Type")]
    pub protocol: String,
}

/// Response of `GET /containers/{id}/json`, reduced to what dockview shows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ContainerDetail {
    pub id: ContainerId,
    /// Name as the Engine reports it, with a leading `/`
    pub name: String,
    /// RFC 3339 creation time
    pub created: String,
    #[serde(deserialize_with = "null_as_default")]
    pub config: DetailConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub state: DetailState,
    #[serde(deserialize_with = "null_as_default")]
    pub host_config: DetailHostConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub network_settings: DetailNetworkSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetailConfig {
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetailState {
    pub status: String,
    pub running: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetailHostConfig {
    pub cpu_percent: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DetailNetworkSettings {
    /// `"80/tcp"` -> host bindings; the Engine sends `null` for unbound ports
    pub ports: Option<BTreeMap<String, Option<Vec<PortBinding>>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PortBinding {
    pub host_ip: String,
    pub host_port: String,
}

impl ContainerDetail {
    /// Name without the leading `/`
    pub fn display_name(&self) -> &str {
        self.name.strip_prefix('/').unwrap_or(&self.name)
    }

    pub fn image(&self) -> &str {
        &self.config.image
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// Published ports as `container_port:host_port`, one per host binding
    pub fn published_ports(&self) -> Vec<String> {
        let Some(ports) = &self.network_settings.ports else {
            return Vec::new();
        };

        ports
            .iter()
            .flat_map(|(key, bindings)| {
                let container_port = key.split('/').next().unwrap_or(key);
                bindings
                    .iter()
                    .flatten()
                    .map(move |b| format!("{}:{}", container_port, b.host_port))
            })
            .collect()
    }
}

/// Image entry from the `Images` field of `GET /system/df`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ImageSummary {
    pub id: ImageId,
    /// `null` for dangling images
    pub repo_tags: Option<Vec<String>>,
    pub size: i64,
    /// Number of containers using the image, `-1` when the Engine did not count
    pub containers: i64,
    /// Unix timestamp in seconds
    pub created: i64,
}

impl ImageSummary {
    pub fn first_repo_tag(&self) -> Option<&str> {
        self.repo_tags
            .as_deref()
            .and_then(|tags| tags.first())
            .map(String::as_str)
    }

    /// Repository and tag of the first repo tag
    pub fn repo_and_tag(&self) -> Option<(&str, &str)> {
        self.first_repo_tag().map(split_repo_tag)
    }

    pub fn in_use(&self) -> bool {
        self.containers > 0
    }
}

/// Split `name:tag` at the last `:` that is not part of a registry host.
/// `registry:5000/app` has no tag, so the tag is empty.
pub fn split_repo_tag(repo_tag: &str) -> (&str, &str) {
    match repo_tag.rfind(':') {
        Some(idx) if !repo_tag[idx + 1..].contains('/') => {
            (&repo_tag[..idx], &repo_tag[idx + 1..])
        }
        _ => (repo_tag, ""),
    }
}
