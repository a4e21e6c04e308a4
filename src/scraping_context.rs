use crate::{config::ScrapingConfig, error::ScrapeError, requests::RequestClient};

pub struct ScrapingContext {
    pub scraping_config: ScrapingConfig,
    pub request_client: RequestClient,
}

impl ScrapingContext {
    /// Context configured from `KUJAP_*` environment variables.
    pub fn new() -> anyhow::Result<Self> {
        let scraping_config = ScrapingConfig::new()?;
        let context = Self::with_config(scraping_config)?;
        Ok(context)
    }

    pub fn with_config(scraping_config: ScrapingConfig) -> Result<Self, ScrapeError> {
        let request_client = RequestClient::new(&scraping_config)?;
        Ok(ScrapingContext {
            scraping_config,
            request_client,
        })
    }
}
