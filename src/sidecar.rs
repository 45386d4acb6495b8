//! JSON `.info` files written next to each downloaded archive.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::{AppRecord, Result, MARKET_NAME};

/// `com.foo_12.apk` -> `MobileAssistant360_com.foo_12.info`
pub fn sidecar_file_name(apk_name: &str) -> String {
    let stem = apk_name.strip_suffix(".apk").unwrap_or(apk_name);
    format!("{MARKET_NAME}_{stem}.info")
}

/// Writes `app` as 4-space indented JSON into `app_folder`, replacing any earlier sidecar.
pub(crate) async fn write_sidecar(app_folder: &Path, apk_name: &str, app: &AppRecord) -> Result<PathBuf> {
    let path = app_folder.join(sidecar_file_name(apk_name));
    tokio::fs::write(&path, to_json(app)?).await?;
    debug!(path = %path.display(), "Sidecar created");
    Ok(path)
}

fn to_json(app: &AppRecord) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    app.serialize(&mut ser)?;
    Ok(buf)
}
