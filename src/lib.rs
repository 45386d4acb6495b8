//! Client for the 360 Mobile Assistant (`zhushou.360.cn`) Android market.
//!
//! Searches the market by keyword, browses it by category and downloads the
//! matching APKs into `<download_folder>/<package>/` together with a JSON
//! `.info` sidecar describing each application.

mod apk_name;
mod category;
pub mod config;
mod download;
mod error;
mod macros;
pub mod market;
pub mod model;
mod parse;
mod process;
mod request;
mod sidecar;

pub use apk_name::{apk_from_url, decode_apk_url, ApkName};
pub use config::{CollisionPolicy, Config};
pub use error::{Error, Result};
pub use market::MobileAssistant360;
pub use model::{AppRecord, CategoryRecord};
pub use sidecar::sidecar_file_name;

const BASE_URL: &str = "http://zhushou.360.cn";
const SEARCH_PATH: &str = "/search/index/";
const DETAIL_PATH: &str = "/detail/index/soft_id/";
const LIST_PATH: &str = "/list/index/cid/";
/// Top level categories: software and games.
const TOP_LEVEL_CATEGORIES: [&str; 2] = ["1", "2"];

const MARKET_NAME: &str = "MobileAssistant360";
const UNKNOWN_PACKAGE: &str = "unknown_package";
const TMP_FOLDER: &str = "tmp";
const CONNECT_TIMEOUT_SECS: u64 = 30;
