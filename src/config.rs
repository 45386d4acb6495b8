//! Runtime configuration for [`MobileAssistant360`](crate::MobileAssistant360).

use std::path::PathBuf;

use serde::Deserialize;

use crate::{BASE_URL, CONNECT_TIMEOUT_SECS, TOP_LEVEL_CATEGORIES};

/// What to do when the archive about to be downloaded already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Download again and replace the existing archive and sidecar.
    #[default]
    Overwrite,
    /// Leave the existing archive alone and leave the app out of the result.
    Skip,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scheme and host of the market, without trailing slash.
    pub base_url: String,
    pub download_dir: PathBuf,
    pub on_collision: CollisionPolicy,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Top level categories whose menus make up the category directory.
    pub categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            download_dir: PathBuf::from("./"),
            on_collision: CollisionPolicy::default(),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            categories: TOP_LEVEL_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_download_dir(mut self, download_dir: impl Into<PathBuf>) -> Self {
        self.download_dir = download_dir.into();
        self
    }

    pub fn with_collision_policy(mut self, on_collision: CollisionPolicy) -> Self {
        self.on_collision = on_collision;
        self
    }
}
