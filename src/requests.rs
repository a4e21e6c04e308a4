use log::debug;
use reqwest::{
    Client, ClientBuilder, Response,
    header::{COOKIE, REFERER},
};

use crate::{charset::decode_euc_kr, config::ScrapingConfig, error::ScrapeError};

pub struct RequestClient {
    client: Client,
    referer: String,
}

impl RequestClient {
    pub fn new(config: &ScrapingConfig) -> Result<Self, ScrapeError> {
        let client = ClientBuilder::new()
            .timeout(config.request_timeout)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self {
            client,
            referer: config.referer.clone(),
        })
    }

    /// GET with the site referer and, when given, the PHP session cookie.
    /// The status code is not checked.
    pub async fn fetch_board_response(
        &self,
        url: &str,
        session_token: Option<&str>,
    ) -> Result<Response, ScrapeError> {
        let mut request = self.client.get(url).header(REFERER, &self.referer);
        if let Some(token) = session_token {
            request = request.header(COOKIE, format!("PHPSESSID={token}"));
        }
        let response = request
            .send()
            .await
            .map_err(|e| ScrapeError::fetch(url, e))?;
        debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }

    /// Plain GET that fails on any non-success status.
    pub async fn fetch_url_response(&self, url: &str) -> Result<Response, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| ScrapeError::fetch(url, e))?;
        debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }

    pub async fn fetch_url_body(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self.fetch_url_response(url).await?;
        decode_body(url, response).await
    }
}

/// Reads the whole body and decodes it from EUC-KR.
pub async fn decode_body(url: &str, response: Response) -> Result<String, ScrapeError> {
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ScrapeError::fetch(url, e))?;
    debug!("read {} bytes from {}", bytes.len(), url);
    Ok(decode_euc_kr(&bytes))
}
