//! Search, browse and category listing against a mocked market.

mod support;

use mobile_assistant_360::{CategoryRecord, Error};
use support::{category_page, market, menu_page, search_page, Listed};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn links(server: &MockServer, first: usize, count: usize) -> Vec<(String, String, String)> {
    (first..first + count)
        .map(|i| {
            (
                i.to_string(),
                format!("Mail {i}"),
                format!("{}/files/com.mail{i}_{i}.apk", server.uri()),
            )
        })
        .collect()
}

fn listed(apps: &[(String, String, String)]) -> Vec<Listed<'_>> {
    apps.iter()
        .map(|(id, name, link)| Listed { id, name, link })
        .collect()
}

async fn mount_search_page(server: &MockServer, page: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/search/index/"))
        .and(query_param("kw", "mail"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_search_stops_at_result_limit() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("failed to create temp dir");
    let page_1 = links(&server, 0, 6);
    let page_2 = links(&server, 6, 6);
    mount_search_page(&server, "1", search_page(&listed(&page_1))).await;
    mount_search_page(&server, "2", search_page(&listed(&page_2))).await;
    Mock::given(method("GET"))
        .and(path("/search/index/"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let apps = market(&server, dir.path()).search("mail", 10).await;

    assert_eq!(apps.len(), 10);
    let names: Vec<_> = apps.iter().map(|a| a.name.clone().unwrap()).collect();
    let expected: Vec<_> = (0..10).map(|i| format!("Mail {i}")).collect();
    assert_eq!(names, expected, "results must keep the market's order");
    for app in &apps {
        assert!(!app.name.as_deref().unwrap_or_default().is_empty());
        assert!(!app.download_link.as_deref().unwrap_or_default().is_empty());
    }
    assert_eq!(apps[3].package_name.as_deref(), Some("com.mail3"));
    assert_eq!(apps[3].version.as_deref(), Some("3"));
    assert_eq!(apps[3].app_id.as_deref(), Some("3"));
}

#[tokio::test]
async fn test_search_keeps_pages_before_a_failing_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("failed to create temp dir");
    let page_1 = links(&server, 0, 3);
    mount_search_page(&server, "1", search_page(&listed(&page_1))).await;
    Mock::given(method("GET"))
        .and(path("/search/index/"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let apps = market(&server, dir.path()).search("mail", 10).await;
    assert_eq!(apps.len(), 3);
}

#[tokio::test]
async fn test_search_stops_on_empty_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("failed to create temp dir");
    let page_1 = links(&server, 0, 2);
    mount_search_page(&server, "1", search_page(&listed(&page_1))).await;
    mount_search_page(&server, "2", search_page(&[])).await;
    Mock::given(method("GET"))
        .and(path("/search/index/"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let apps = market(&server, dir.path()).search("mail", 10).await;
    assert_eq!(apps.len(), 2);
}

#[tokio::test]
async fn test_search_with_zero_limit_is_empty() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("failed to create temp dir");

    let apps = market(&server, dir.path()).search("mail", 0).await;
    assert!(apps.is_empty());
}

#[tokio::test]
async fn test_browse_requires_a_limit() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("failed to create temp dir");

    let result = market(&server, dir.path()).browse("1", None).await;

    assert!(matches!(result, Err(Error::ResultLimitRequired)));
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "no request expected, got {}", requests.len());
}

#[tokio::test]
async fn test_browse_empty_first_page() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("failed to create temp dir");
    Mock::given(method("GET"))
        .and(path("/list/index/cid/1/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(category_page(&[])))
        .mount(&server)
        .await;

    let apps = market(&server, dir.path()).browse("1", Some(10)).await.unwrap();
    assert!(apps.is_empty());
}

#[tokio::test]
async fn test_browse_truncates_to_limit() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("failed to create temp dir");
    let page_1 = links(&server, 0, 5);
    Mock::given(method("GET"))
        .and(path("/list/index/cid/11/"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(category_page(&listed(&page_1))))
        .mount(&server)
        .await;

    let apps = market(&server, dir.path()).browse("11", Some(3)).await.unwrap();

    assert_eq!(apps.len(), 3);
    assert_eq!(apps[0].name.as_deref(), Some("Mail 0"));
    assert_eq!(apps[2].download_link.as_deref(), Some(page_1[2].2.as_str()));
    assert_eq!(apps[2].apk_name.as_deref(), Some("com.mail2_2.apk"));
}

#[tokio::test]
async fn test_list_categories_skips_failing_top_level_category() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("failed to create temp dir");
    let menu = menu_page(&[("系统安全", "/list/index/cid/11/"), ("通讯社交", "/list/index/cid/12/")]);
    Mock::given(method("GET"))
        .and(path("/list/index/cid/1/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(menu))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/list/index/cid/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let categories = market(&server, dir.path()).list_categories().await;

    assert_eq!(
        categories,
        vec![
            CategoryRecord { category: "系统安全".into(), cat_id: "11".into() },
            CategoryRecord { category: "通讯社交".into(), cat_id: "12".into() },
        ]
    );
}
