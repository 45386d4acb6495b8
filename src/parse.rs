//! Field extraction from the market's HTML.
//!
//! Every field has its own lookup returning `Option`: a missing or oddly shaped
//! element only drops that one field. Only a missing list container fails a whole page.

use scraper::{ElementRef, Html, Selector};
use tokio::task::spawn_blocking;

use crate::{decode_apk_url, AppRecord, CategoryRecord, Error, Result};

const HANDLER_URL_PARAM: &str = "url=";

/// Runs `parse` on a blocking thread, the parsed document never has to cross an `.await`.
pub(crate) async fn parse_html<T, F>(html: String, parse: F) -> Result<T>
where
    F: FnOnce(&str) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(move || parse(&html)).await?
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

struct Selectors {
    search_list: Selector,
    category_list: Selector,
    item: Selector,
    h3: Selector,
    anchor: Selector,
    span: Selector,
    down_num: Selector,
    download: Selector,
    sdlft: Selector,
    sid: Selector,
    handler: Selector,
    app_name: Selector,
    s1: Selector,
    s3: Selector,
    base_info: Selector,
    tbody: Selector,
    td: Selector,
    menu: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            search_list: create_selector(".SeaCon")?,
            category_list: create_selector("ul.iconList")?,
            item: create_selector("li")?,
            h3: create_selector("h3")?,
            anchor: create_selector("a")?,
            span: create_selector("span")?,
            down_num: create_selector(".downNum")?,
            download: create_selector(".download.comdown a")?,
            sdlft: create_selector(".sdlft")?,
            sid: create_selector("a[sid]")?,
            handler: create_selector("a.dbtn")?,
            app_name: create_selector("#app-name")?,
            s1: create_selector(".s-1")?,
            s3: create_selector(".s-3")?,
            base_info: create_selector(".base-info")?,
            tbody: create_selector("tbody")?,
            td: create_selector("td")?,
            menu: create_selector(".select")?,
        })
    }
}

// ---- Search results ----

/// Parses one page of search results. Items without a name or a download link are dropped.
pub(crate) fn parse_search_page(html: &str) -> Result<Vec<AppRecord>> {
    let sel = Selectors::new()?;
    let doc = Html::parse_document(html);
    let list = doc
        .select(&sel.search_list)
        .next()
        .ok_or(Error::MissingElement(".SeaCon"))?;

    let apps = list
        .select(&sel.item)
        .map(|item| {
            let download = item.select(&sel.download).next();
            listed_app(
                search_title(item, &sel),
                download.and_then(|a| attr(a, "sid")),
                search_rating(item, &sel),
                item.select(&sel.down_num).next().and_then(text_of),
                download.and_then(|a| attr(a, "href")),
            )
        })
        .filter(AppRecord::is_listable)
        .collect();
    Ok(apps)
}

fn search_title(item: ElementRef, sel: &Selectors) -> Option<String> {
    let h3 = item.select(&sel.h3).next()?;
    attr(h3.select(&sel.anchor).next()?, "title")
}

/// The rating is the bare text between the star markup and the score label.
fn search_rating(item: ElementRef, sel: &Selectors) -> Option<String> {
    let sdlft = item.select(&sel.sdlft).next()?;
    if sdlft.children().count() != 5 {
        return None;
    }
    text_child(sdlft, 2)
}

// ---- Category listing ----

/// Parses one page of a category listing.
pub(crate) fn parse_category_page(html: &str) -> Result<Vec<AppRecord>> {
    let sel = Selectors::new()?;
    let doc = Html::parse_document(html);
    let list = doc
        .select(&sel.category_list)
        .next()
        .ok_or(Error::MissingElement("ul.iconList"))?;

    let apps = list
        .select(&sel.item)
        .map(|item| {
            listed_app(
                item.select(&sel.h3)
                    .next()
                    .and_then(|h3| h3.select(&sel.anchor).next())
                    .and_then(text_of),
                item.select(&sel.sid).next().and_then(|a| attr(a, "sid")),
                None,
                item.select(&sel.span).next().and_then(text_of),
                item.select(&sel.handler)
                    .next()
                    .and_then(|a| attr(a, "href"))
                    .map(|href| handler_target(&href)),
            )
        })
        .filter(AppRecord::is_listable)
        .collect();
    Ok(apps)
}

/// Listing buttons link through the desktop client handler
/// (`zhushou360://...&url=<archive>`); the archive link is what we want.
fn handler_target(href: &str) -> String {
    match href.find(HANDLER_URL_PARAM) {
        Some(index) if href.starts_with("zhushou360:") => {
            href[index + HANDLER_URL_PARAM.len()..].to_string()
        }
        _ => href.to_string(),
    }
}

fn listed_app(
    name: Option<String>,
    app_id: Option<String>,
    rating: Option<String>,
    downloads: Option<String>,
    download_link: Option<String>,
) -> AppRecord {
    let decoded = download_link.as_deref().and_then(decode_apk_url);
    let (apk_name, package_name, version) = match decoded {
        Some(d) => (Some(d.apk_name), Some(d.package), d.version),
        None => (None, None, None),
    };
    AppRecord {
        name,
        apk_name,
        package_name,
        version,
        app_id,
        rating,
        downloads,
        download_link,
        ..Default::default()
    }
}

// ---- Detail page ----

/// Extracts whatever the detail page of an app offers. Never fails on missing markup.
pub(crate) fn parse_detail_page(html: &str) -> Result<AppRecord> {
    let sel = Selectors::new()?;
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    Ok(AppRecord {
        name: detail_title(root, &sel),
        rating: detail_rating(root, &sel),
        creator: base_info_cell(root, &sel, 0),
        last_update: base_info_cell(root, &sel, 1),
        version: base_info_cell(root, &sel, 2),
        size: detail_size(root, &sel),
        ..Default::default()
    })
}

fn detail_title(root: ElementRef, sel: &Selectors) -> Option<String> {
    let app_name = root.select(&sel.app_name).next()?;
    attr(app_name.select(&sel.span).next()?, "title")
}

fn detail_rating(root: ElementRef, sel: &Selectors) -> Option<String> {
    text_child(root.select(&sel.s1).next()?, 0)
}

/// Base info cells look like `<td><strong>Label:</strong>value</td>`,
/// in the order creator, last update, version.
fn base_info_cell(root: ElementRef, sel: &Selectors, index: usize) -> Option<String> {
    let base_info = root.select(&sel.base_info).next()?;
    let tbody = base_info.select(&sel.tbody).next()?;
    text_child(tbody.select(&sel.td).nth(index)?, 1)
}

fn detail_size(root: ElementRef, sel: &Selectors) -> Option<String> {
    only_text(root.select(&sel.s3).nth(1)?)
}

// ---- Category menu ----

/// Parses the category menu of a top level category page.
/// The first entry links to the whole top level category and is skipped.
pub(crate) fn parse_category_menu(html: &str) -> Result<Vec<CategoryRecord>> {
    let sel = Selectors::new()?;
    let doc = Html::parse_document(html);
    let menu = doc
        .select(&sel.menu)
        .next()
        .ok_or(Error::MissingElement(".select"))?;

    let categories = menu
        .select(&sel.anchor)
        .skip(1)
        .filter_map(|a| {
            let cat_id = category_id(a.value().attr("href")?)?;
            Some(CategoryRecord {
                category: text_of(a).unwrap_or_default(),
                cat_id,
            })
        })
        .collect();
    Ok(categories)
}

/// `/list/index/cid/11/` -> `11`: the second to last segment when it isn't empty,
/// otherwise the last one.
pub(crate) fn category_id(href: &str) -> Option<String> {
    let segments: Vec<&str> = href.split('/').collect();
    let id = match segments.as_slice() {
        [.., prev, _] if !prev.is_empty() => prev,
        [.., last] => last,
        [] => return None,
    };
    (!id.is_empty()).then(|| id.to_string())
}

// ---- Helpers ----

#[inline]
fn attr(el: ElementRef, name: &str) -> Option<String> {
    el.value().attr(name).map(|v| v.to_string())
}

/// All the text inside `el`, trimmed.
fn text_of(el: ElementRef) -> Option<String> {
    let text = el.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Text of `el` when it is reached through a chain of only children,
/// e.g. `<span><b>23M</b></span>` -> `23M`.
fn only_text(el: ElementRef) -> Option<String> {
    let mut el = el;
    loop {
        let mut children = el.children();
        let child = children.next()?;
        if children.next().is_some() {
            return None;
        }
        match ElementRef::wrap(child) {
            Some(inner) => el = inner,
            None => {
                let text = child.value().as_text()?.trim();
                return (!text.is_empty()).then(|| text.to_string());
            }
        }
    }
}

/// The `index`th child node of `el`, provided it is a text node.
fn text_child(el: ElementRef, index: usize) -> Option<String> {
    let node = el.children().nth(index)?;
    let text = node.value().as_text()?.trim();
    (!text.is_empty()).then(|| text.to_string())
}
