use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::{Config, Error, Result, DETAIL_PATH, LIST_PATH, SEARCH_PATH};

pub(crate) fn build_client(config: &Config) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()?;
    Ok(client)
}

/// Requests one page of search results and returns its HTML.
pub(crate) async fn request_search_page(
    client: &Client,
    base_url: &str,
    keyword: &str,
    page_num: usize,
) -> Result<String> {
    let url = format!("{base_url}{SEARCH_PATH}");
    let query = [("kw", keyword.to_string()), ("page", page_num.to_string())];
    request_page_html(client, &url, &query).await
}

/// Requests one page of a category listing and returns its HTML.
pub(crate) async fn request_category_page(
    client: &Client,
    base_url: &str,
    cat_id: &str,
    page_num: usize,
) -> Result<String> {
    let url = format!("{base_url}{LIST_PATH}{cat_id}/");
    request_page_html(client, &url, &[("page", page_num.to_string())]).await
}

/// Requests the landing page of a top level category, which carries the category menu.
pub(crate) async fn request_menu_page(client: &Client, base_url: &str, cat_id: &str) -> Result<String> {
    let url = format!("{base_url}{LIST_PATH}{cat_id}/");
    request_page_html(client, &url, &[]).await
}

pub(crate) async fn request_detail_page(client: &Client, base_url: &str, app_id: &str) -> Result<String> {
    let url = format!("{base_url}{DETAIL_PATH}{app_id}");
    request_page_html(client, &url, &[]).await
}

/// Starts a GET for an archive. The body is left unread so it can be streamed.
pub(crate) async fn request_archive(client: &Client, url: &str) -> Result<Response> {
    let res = client.get(url).send().await?;
    check_status(url, res)
}

/// Requests a page and returns a `Result<String>` containing the HTML.
/// Anything but `200 OK` is an error.
async fn request_page_html(client: &Client, url: &str, query: &[(&str, String)]) -> Result<String> {
    debug!(url, ?query, "requesting page");
    let res = client.get(url).query(query).send().await?;
    let html = check_status(url, res)?.text().await?;
    Ok(html)
}

fn check_status(url: &str, res: Response) -> Result<Response> {
    if res.status() != StatusCode::OK {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status: res.status().as_u16(),
        });
    }
    Ok(res)
}
