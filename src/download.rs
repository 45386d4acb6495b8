use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, error, info, warn};

use crate::parse::{parse_detail_page, parse_html};
use crate::request::{request_archive, request_detail_page};
use crate::sidecar::write_sidecar;
use crate::{
    apk_from_url, info_time, AppRecord, CollisionPolicy, Error, Result, TMP_FOLDER,
    UNKNOWN_PACKAGE,
};

/// Downloads apps one after the other into `<download_folder>/<package>/`.
///
/// Archives are first written to `<download_folder>/tmp/` and only moved next
/// to their sidecar once the whole body arrived.
pub(crate) struct Downloader<'a> {
    pub(crate) client: &'a Client,
    pub(crate) base_url: &'a str,
    pub(crate) download_folder: &'a Path,
    pub(crate) on_collision: CollisionPolicy,
}

impl Downloader<'_> {
    /// Returns the apps that were downloaded, enriched with their detail page fields.
    ///
    /// Only failing to set up the staging folder is an error; a failing app is
    /// logged and left out of the result.
    pub(crate) async fn download_apps(&self, apps: &[AppRecord]) -> Result<Vec<AppRecord>> {
        let start_time = Local::now();
        let download_folder = self.download_folder();
        let tmp_folder = create_tmp_folder(&download_folder).await?;

        let mut downloaded = Vec::with_capacity(apps.len());
        for app in apps {
            if let Some(app) = self.download_app(app, &download_folder, &tmp_folder).await {
                downloaded.push(app);
            }
        }

        // Leftovers of failed downloads keep it around.
        let _ = tokio::fs::remove_dir(&tmp_folder).await;
        info_time!(start_time, "Downloaded {} of {} apps", downloaded.len(), apps.len());
        Ok(downloaded)
    }

    fn download_folder(&self) -> PathBuf {
        if self.download_folder.as_os_str().is_empty() {
            warn!("Something is wrong with download_folder. Now using the current directory.");
            return PathBuf::from("./");
        }
        self.download_folder.to_path_buf()
    }

    async fn download_app(
        &self,
        app: &AppRecord,
        download_folder: &Path,
        tmp_folder: &Path,
    ) -> Option<AppRecord> {
        let name = app.name.as_deref()?;
        let app_id = app.app_id.as_deref().filter(|id| !id.is_empty())?;

        let package = package_folder_name(app.package_name.as_deref());
        let app_folder = download_folder.join(&package);
        match ensure_dir(&app_folder).await {
            Ok(true) => {}
            Ok(false) => {
                error!("Unable to create app folder for app \"{name}\": {} is not a folder. Skip this app.", app_folder.display());
                return None;
            }
            Err(e) => {
                error!("Unable to create app folder for app \"{name}\": {e}. Skip this app.");
                return None;
            }
        }

        let Some(dl_url) = app.download_link.as_deref().filter(|url| !url.is_empty()) else {
            error!("Unable to find a download url for app \"{name}\". Skip this app.");
            return None;
        };

        let app_info = match self.request_details(app_id).await {
            Ok(details) => app.clone().merge(details),
            Err(e) => {
                warn!("Unable to collect information for app \"{name}\": {e}");
                app.clone()
            }
        };

        let apk_name = app
            .apk_name
            .clone()
            .filter(|apk| is_apk_file_name(apk))
            .or_else(|| apk_from_url(dl_url))
            .unwrap_or_else(|| {
                format!("{package}{}.apk", app_info.version.as_deref().unwrap_or_default())
            });

        let apk_path = app_folder.join(&apk_name);
        if tokio::fs::metadata(&apk_path).await.is_ok_and(|meta| meta.is_file()) {
            match self.on_collision {
                CollisionPolicy::Skip => {
                    warn!("The app \"{name}\" exists at \"{}\". Skip this app.", apk_path.display());
                    return None;
                }
                CollisionPolicy::Overwrite => {
                    warn!("The app \"{name}\" exists at \"{}\". It will be replaced.", apk_path.display());
                }
            }
        }

        let tmp_apk = tmp_folder.join(&apk_name);
        if let Err(e) = self.stream_to_file(name, dl_url, &tmp_apk).await {
            error!("Unable to download app \"{name}\": {e}. Skip this app.");
            remove_partial_file(&tmp_apk).await;
            return None;
        }
        if let Err(e) = move_file(&tmp_apk, &apk_path).await {
            error!("Unable to move app \"{name}\" to \"{}\": {e}. Skip this app.", apk_path.display());
            remove_partial_file(&tmp_apk).await;
            return None;
        }

        let app_info = app_info.merge(AppRecord {
            apk_name: Some(apk_name.clone()),
            package_name: Some(package),
            ..Default::default()
        });
        if let Err(e) = write_sidecar(&app_folder, &apk_name, &app_info).await {
            error!("Cannot create info file for app \"{name}\": {e}");
        }
        info!(app = name, path = %apk_path.display(), "download complete");
        Some(app_info)
    }

    async fn request_details(&self, app_id: &str) -> Result<AppRecord> {
        let html = request_detail_page(self.client, self.base_url, app_id).await?;
        parse_html(html, parse_detail_page).await
    }

    /// Streams the archive at `url` into `path` and returns the number of bytes written.
    /// The announced content length only feeds the progress events.
    async fn stream_to_file(&self, name: &str, url: &str, path: &Path) -> Result<u64> {
        let mut res = request_archive(self.client, url).await?;
        let total = res.content_length().filter(|len| *len > 0);

        let mut writer = BufWriter::new(File::create(path).await?);
        let mut written: u64 = 0;
        while let Some(chunk) = res.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
            match total {
                Some(total) => debug!(app = name, written, total, "{}%", written * 100 / total),
                None => debug!(app = name, written, "downloading"),
            }
        }
        writer.flush().await?;
        Ok(written)
    }
}

/// Package names become folder names, anything that isn't a plain name goes to `unknown_package`.
fn package_folder_name(package: Option<&str>) -> String {
    match package {
        Some(p) if !p.is_empty() && p != "." && p != ".." && !p.contains(['/', '\\']) => p.to_string(),
        _ => UNKNOWN_PACKAGE.to_string(),
    }
}

fn is_apk_file_name(name: &str) -> bool {
    name.len() > ".apk".len() && name.ends_with(".apk") && !name.contains(['/', '\\'])
}

async fn create_tmp_folder(download_folder: &Path) -> Result<PathBuf> {
    let tmp_folder = download_folder.join(TMP_FOLDER);
    if !ensure_dir(&tmp_folder).await? {
        return Err(Error::StagingDirectory(tmp_folder));
    }
    Ok(tmp_folder)
}

/// Creates `path` unless it already is a directory.
/// `Ok(false)` means something that isn't a directory sits at `path`.
async fn ensure_dir(path: &Path) -> std::io::Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tokio::fs::create_dir_all(path).await?;
            Ok(true)
        }
        Err(e) => Err(e),
    }
}

/// Moves a finished download into place. Falls back to copying when the
/// staging folder sits on another device.
async fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if tokio::fs::rename(from, to).await.is_ok() {
        return Ok(());
    }
    tokio::fs::copy(from, to).await?;
    if let Err(e) = tokio::fs::remove_file(from).await {
        warn!("Unable to remove temporary file {}: {e}", from.display());
    }
    Ok(())
}

async fn remove_partial_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            error!("Unable to remove temporary file {}: {e}", path.display())
        }
        _ => {}
    }
}
