use serde::{Deserialize, Deserializer};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Whole-request timeout such as `30s`. No timeout when unset.
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Hosts the web viewer may fetch from. Empty allows any host.
    pub allowed_hosts: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("splat-webmap/", env!("CARGO_PKG_VERSION")).to_string(),
            allowed_hosts: Vec::new(),
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}
