use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read keyword file {path:?}: {source}")]
    KeywordFile { path: PathBuf, source: io::Error },

    #[error("could not create directory {path:?}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("could not write {path:?}: {source}")]
    WriteFile { path: PathBuf, source: io::Error },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("search request for '{keyword}' failed: {source}")]
    Search { keyword: String, source: reqwest::Error },

    #[error("search engine blocked the request for '{keyword}' (HTTP {status})")]
    Blocked { keyword: String, status: u16 },

    #[error("invalid search URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid CSS selector '{0}'")]
    Selector(String),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, Error>;
