//! The public face of the crate.

use std::path::{Path, PathBuf};

use reqwest::Client;

use crate::category::list_categories;
use crate::download::Downloader;
use crate::process::{browse_apps, search_apps};
use crate::request::build_client;
use crate::{AppRecord, CategoryRecord, Config, Error, Result};

/// Client for the 360 Mobile Assistant market.
///
/// ```no_run
/// use mobile_assistant_360::MobileAssistant360;
///
/// # async fn example() -> mobile_assistant_360::Result<()> {
/// let market = MobileAssistant360::new("./apks")?;
/// let apps = market.search("mail", 10).await;
/// let downloaded = market.download(&apps).await?;
/// println!("{} apps downloaded", downloaded.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MobileAssistant360 {
    client: Client,
    config: Config,
}

impl MobileAssistant360 {
    /// A market client downloading into `download_folder`, everything else default.
    pub fn new(download_folder: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(Config::default().with_download_dir(download_folder))
    }

    pub fn with_config(mut config: Config) -> Result<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn download_folder(&self) -> &Path {
        &self.config.download_dir
    }

    /// Sets the folder the next [`download`](Self::download) stores apps in.
    pub fn set_download_folder(&mut self, download_folder: impl Into<PathBuf>) {
        self.config.download_dir = download_folder.into();
    }

    /// Searches the market for `keyword` and returns at most `limit` apps, in the
    /// order the market lists them.
    ///
    /// Network and markup problems end the search early; whatever was found up to
    /// that point is returned.
    pub async fn search(&self, keyword: &str, limit: usize) -> Vec<AppRecord> {
        search_apps(&self.client, &self.config.base_url, keyword, limit).await
    }

    /// Lists at most `limit` apps of category `cat_id` (see [`list_categories`](Self::list_categories)).
    ///
    /// # Errors
    ///
    /// [`Error::ResultLimitRequired`] when `limit` is `None`. Nothing is requested then.
    pub async fn browse(&self, cat_id: &str, limit: Option<usize>) -> Result<Vec<AppRecord>> {
        let limit = limit.ok_or(Error::ResultLimitRequired)?;
        Ok(browse_apps(&self.client, &self.config.base_url, cat_id, limit).await)
    }

    /// Reads the category menus of the configured top level categories.
    pub async fn list_categories(&self) -> Vec<CategoryRecord> {
        list_categories(&self.client, &self.config.base_url, &self.config.categories).await
    }

    /// Downloads `apps` into `<download_folder>/<package>/`, each next to a
    /// `MobileAssistant360_<apk>.info` sidecar, and returns the ones that made it,
    /// completed with their detail page fields, `ApkName` and `PackageName`.
    ///
    /// Apps without `AppId`, `Name` or `DownloadLink` are skipped.
    ///
    /// # Errors
    ///
    /// Only when the `tmp` staging folder can't be created. Problems with a
    /// single app just leave that app out.
    pub async fn download(&self, apps: &[AppRecord]) -> Result<Vec<AppRecord>> {
        Downloader {
            client: &self.client,
            base_url: &self.config.base_url,
            download_folder: &self.config.download_dir,
            on_collision: self.config.on_collision,
        }
        .download_apps(apps)
        .await
    }
}
