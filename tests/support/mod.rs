//! HTML fixtures shaped like the market's pages.
#![allow(dead_code)]

use std::path::Path;

use mobile_assistant_360::{Config, MobileAssistant360};
use wiremock::MockServer;

pub struct Listed<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub link: &'a str,
}

pub fn market(server: &MockServer, download_dir: &Path) -> MobileAssistant360 {
    let config = Config::default()
        .with_base_url(server.uri())
        .with_download_dir(download_dir);
    MobileAssistant360::with_config(config).expect("failed to build market client")
}

pub fn search_page(apps: &[Listed]) -> String {
    let items: String = apps
        .iter()
        .map(|app| {
            format!(
                r#"<li><dl><dd>
                    <h3><a href="/detail/index/soft_id/{id}" title="{name}">{name}</a></h3>
                    <div class="sdlft"><span class="stars"></span><em></em> 8.0 <span>分</span><i></i></div>
                    <p class="downNum">100次下载</p>
                    <div class="download comdown"><a sid="{id}" href="{link}">下载</a></div>
                </dd></dl></li>"#,
                id = app.id,
                name = app.name,
                link = app.link,
            )
        })
        .collect();
    format!(r#"<html><body><div class="SeaCon"><ul>{items}</ul></div></body></html>"#)
}

pub fn category_page(apps: &[Listed]) -> String {
    let items: String = apps
        .iter()
        .map(|app| {
            format!(
                r#"<li>
                    <a sid="{id}" href="/detail/index/soft_id/{id}"><img src="icon.png"></a>
                    <h3><a href="/detail/index/soft_id/{id}">{name}</a></h3>
                    <span>100次下载</span>
                    <a class="dbtn" href="zhushou360://type=apk&amp;name={name}&amp;url={link}">下载</a>
                </li>"#,
                id = app.id,
                name = app.name,
                link = app.link,
            )
        })
        .collect();
    format!(r#"<html><body><ul class="iconList">{items}</ul></body></html>"#)
}

pub fn menu_page(entries: &[(&str, &str)]) -> String {
    let items: String = entries
        .iter()
        .map(|(label, href)| format!(r#"<li><a href="{href}">{label}</a></li>"#))
        .collect();
    format!(r#"<html><body><ul class="select"><li><a href="/list/index/cid/1/">全部</a></li>{items}</ul></body></html>"#)
}

pub fn detail_page(name: &str, creator: &str, update: &str, version: &str, size: &str) -> String {
    format!(
        r#"<html><body>
            <h2 id="app-name"><span title="{name}">{name}</span></h2>
            <div class="pf"><span class="s-1 js-votepanel">9.1<em>分</em></span>
              <span class="s-3">下载：100次</span><span class="s-3">{size}</span></div>
            <div class="base-info"><table><tbody>
              <tr><td><strong>作者：</strong>{creator}</td><td><strong>更新时间：</strong>{update}</td></tr>
              <tr><td><strong>版本：</strong>{version}</td></tr>
            </tbody></table></div>
        </body></html>"#
    )
}
