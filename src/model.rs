//! Records shared by the paginator, the field extractor and the downloader.

use serde::{Deserialize, Serialize};

/// One application listed on the market.
///
/// Serialized with the market's field names (`Name`, `PackageName`, ...);
/// absent fields are left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AppRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apk_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downloads: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

impl AppRecord {
    /// A listing is kept only when it has both a name and a download link.
    pub fn is_listable(&self) -> bool {
        non_empty(&self.name) && non_empty(&self.download_link)
    }

    /// Overlays every field present in `other` on top of `self`.
    pub fn merge(mut self, other: AppRecord) -> AppRecord {
        macro_rules! overlay {
            ($($field:ident),*) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        overlay!(
            name,
            apk_name,
            package_name,
            version,
            app_id,
            rating,
            downloads,
            download_link,
            creator,
            size,
            last_update
        );
        self
    }
}

fn non_empty(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|s| !s.is_empty())
}

/// One entry of the category menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "CatID")]
    pub cat_id: String,
}
