mod article_scraper;
mod category;
mod charset;
mod config;
mod error;
mod listing_scraper;
mod requests;
mod scraping_context;
mod session;
mod text_manipulators;

pub use article_scraper::{ArticleParser, ArticleRecord, ArticleScraper, parse_article_html};
pub use category::{Category, classify};
pub use charset::{decode_euc_kr, encode_file_name};
pub use config::{AttachmentPolicy, LoadFromEnv, SITE_ORIGIN, ScrapingConfig, ScrapingEnv};
pub use error::ScrapeError;
pub use listing_scraper::ListingScraper;
pub use requests::RequestClient;
pub use scraping_context::ScrapingContext;
pub use session::acquire_session;
