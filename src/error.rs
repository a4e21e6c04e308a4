use thiserror::Error;

use crate::category::Category;

/// Every failure is terminal for the operation that raised it.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no Set-Cookie header in response from {url}")]
    NoCookie { url: String },

    #[error("no PHPSESSID in Set-Cookie header from {url}")]
    NoSessionToken { url: String },

    #[error("no article links on page {page} of the {category} board")]
    NoArticlesFound { page: u32, category: Category },

    #[error("failed to fetch {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("title cell not found")]
    TitleNotFound,

    #[error("date cell not found")]
    DateNotFound,

    #[error("writer cell not found")]
    WriterNotFound,

    #[error("content region not found")]
    ContentNotFound,

    #[error("attachment list not found")]
    FileSectionNotFound,

    #[error("invalid category number: {0}")]
    InvalidCategory(i64),

    #[error("page numbers start at 1, got {0}")]
    InvalidPage(u32),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid config value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

impl ScrapeError {
    pub(crate) fn fetch(url: &str, source: reqwest::Error) -> Self {
        ScrapeError::Fetch {
            url: url.to_string(),
            source,
        }
    }
}
