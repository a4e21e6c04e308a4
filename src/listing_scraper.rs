use log::{info, warn};
use regex::Regex;

use crate::{
    category::Category, error::ScrapeError, requests::decode_body, scraping_context::ScrapingContext,
    session::acquire_session,
};

/// One page of a notice board's listing.
#[derive(Debug, Clone, Copy)]
pub struct ListingScraper {
    pub page: u32,
    pub category: Category,
}

impl ListingScraper {
    pub fn new(page: u32, category: Category) -> Self {
        Self { page, category }
    }

    /// Collects the absolute article URLs on this page, in page order.
    pub async fn scrape(&self, ctx: &ScrapingContext) -> Result<Vec<String>, ScrapeError> {
        if self.page == 0 {
            return Err(ScrapeError::InvalidPage(self.page));
        }
        let config = &ctx.scraping_config;
        let base_url = config.listing_base_url(self.category.board_id());
        let session_token = acquire_session(&ctx.request_client, &base_url).await?;

        let page_url = format!("{}&pagemove=GOTO&pageno={}", base_url, self.page);
        let response = ctx
            .request_client
            .fetch_board_response(&page_url, Some(&session_token))
            .await?;
        let html = decode_body(&page_url, response).await?;

        let urls = extract_article_urls(&html, &config.article_base_url())?;
        if urls.is_empty() {
            if !config.allow_empty_listing {
                return Err(ScrapeError::NoArticlesFound {
                    page: self.page,
                    category: self.category,
                });
            }
            warn!("page {} of the {} board lists no articles", self.page, self.category);
        }
        info!(
            "found {} articles on page {} of the {} board",
            urls.len(),
            self.page,
            self.category
        );
        Ok(urls)
    }
}

pub(crate) fn extract_article_urls(
    html: &str,
    article_base_url: &str,
) -> Result<Vec<String>, ScrapeError> {
    let link_regex = Regex::new(r"bbs_content\.html(.+?)type=B")?;
    let urls = link_regex
        .find_iter(html)
        .map(|m| format!("{}{}", article_base_url, m.as_str()))
        .collect();
    Ok(urls)
}
