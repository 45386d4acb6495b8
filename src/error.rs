use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The selector you are trying to scrape for is missing. Selector: {0}")]
    ParseMissingSelector(String),
    #[error("The page doesn't contain the expected element: {0}")]
    MissingElement(&'static str),

    #[error("Unexpected status {status} for url \"{url}\"")]
    HttpStatus { url: String, status: u16 },

    #[error("A result limit is required for category browsing")]
    ResultLimitRequired,
    #[error("Unable to create staging folder {}", .0.display())]
    StagingDirectory(PathBuf),

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Tokio Join Error, couldn't await a task! {0}")]
    RuntimeJoin(#[from] tokio::task::JoinError),

    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
