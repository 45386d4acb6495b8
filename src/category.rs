use chrono::Local;
use reqwest::Client;
use tracing::error;

use crate::parse::{parse_category_menu, parse_html};
use crate::request::request_menu_page;
use crate::{info_time, CategoryRecord, Result};

/// Reads the category menu of every top level category in `top_level`.
/// A top level category whose menu can't be fetched or parsed is left out.
pub(crate) async fn list_categories(
    client: &Client,
    base_url: &str,
    top_level: &[String],
) -> Vec<CategoryRecord> {
    let start_time = Local::now();
    let mut categories = Vec::new();
    for cat_id in top_level {
        match request_menu(client, base_url, cat_id).await {
            Ok(menu) => categories.extend(menu),
            Err(e) => error!("Unable to get the categories of {cat_id}: {e}"),
        }
    }
    info_time!(start_time, "Found {} categories", categories.len());
    categories
}

async fn request_menu(client: &Client, base_url: &str, cat_id: &str) -> Result<Vec<CategoryRecord>> {
    let html = request_menu_page(client, base_url, cat_id).await?;
    parse_html(html, parse_category_menu).await
}
