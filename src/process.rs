use std::future::Future;

use chrono::Local;
use reqwest::Client;
use tracing::{debug, error};

use crate::parse::{parse_category_page, parse_html, parse_search_page};
use crate::request::{request_category_page, request_search_page};
use crate::{info_time, AppRecord, Result};

const START_PAGE: usize = 1;

/// Collects search results for `keyword` until `limit` apps are found or the results run out.
pub(crate) async fn search_apps(
    client: &Client,
    base_url: &str,
    keyword: &str,
    limit: usize,
) -> Vec<AppRecord> {
    let start_time = Local::now();
    let apps = paginate(limit, move |page_num| async move {
        let html = request_search_page(client, base_url, keyword, page_num).await?;
        parse_html(html, parse_search_page).await
    })
    .await;
    info_time!(start_time, "Search \"{}\" returned {} apps", keyword, apps.len());
    apps
}

/// Collects the apps listed under category `cat_id` until `limit` apps are found
/// or the listing runs out.
pub(crate) async fn browse_apps(
    client: &Client,
    base_url: &str,
    cat_id: &str,
    limit: usize,
) -> Vec<AppRecord> {
    let start_time = Local::now();
    let apps = paginate(limit, move |page_num| async move {
        let html = request_category_page(client, base_url, cat_id, page_num).await?;
        parse_html(html, parse_category_page).await
    })
    .await;
    info_time!(start_time, "Category {} returned {} apps", cat_id, apps.len());
    apps
}

/// Requests pages one after the other, starting at page 1, and stops on the first
/// failing page, the first empty page, or once `limit` apps are collected.
/// Apps keep the order they were found in; anything past `limit` is cut off the tail.
async fn paginate<F, Fut>(limit: usize, mut fetch_page: F) -> Vec<AppRecord>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<AppRecord>>>,
{
    let mut apps = Vec::new();
    if limit == 0 {
        return apps;
    }

    let mut page_num = START_PAGE;
    loop {
        let page = fetch_page(page_num).await;
        page_num += 1;

        let page = match page {
            Ok(page) => page,
            Err(e) => {
                error!("Unable to get page {}: {e}", page_num - 1);
                break;
            }
        };
        if page.is_empty() {
            debug!(page = page_num - 1, "found EMPTY page");
            break;
        }

        debug!(page = page_num - 1, found = page.len(), "processed page");
        apps.extend(page);
        if apps.len() >= limit {
            apps.truncate(limit);
            break;
        }
    }
    apps
}
