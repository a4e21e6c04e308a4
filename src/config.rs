use std::{str::FromStr, time::Duration};

use anyhow::Context;
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::ScrapeError;

pub const SITE_ORIGIN: &str = "http://www.kujap.com";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ENV_PREFIX: &str = "KUJAP_";

/// What to do when an article page has no `<ul id='file'>` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachmentPolicy {
    /// A missing block fails the parse, as every live page carries one.
    #[default]
    Required,
    /// A missing block means the article has no attachments.
    Optional,
}

impl FromStr for AttachmentPolicy {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "required" => Ok(AttachmentPolicy::Required),
            "optional" => Ok(AttachmentPolicy::Optional),
            _ => Err(ScrapeError::InvalidConfig {
                key: "attachment_policy",
                value: s.to_string(),
            }),
        }
    }
}

/// The env config env vars for scraping. All of them are optional.
#[derive(Debug, Default, Deserialize)]
pub struct ScrapingEnv {
    site_origin: Option<String>,
    referer: Option<String>,
    request_timeout_secs: Option<u64>,
    allow_empty_listing: Option<bool>,
    attachment_policy: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScrapingConfig {
    pub site_origin: String,
    pub referer: String,
    pub request_timeout: Duration,
    pub allow_empty_listing: bool,
    pub attachment_policy: AttachmentPolicy,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            site_origin: SITE_ORIGIN.to_string(),
            referer: SITE_ORIGIN.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            allow_empty_listing: false,
            attachment_policy: AttachmentPolicy::Required,
        }
    }
}

impl ScrapingConfig {
    /// Defaults overridden by any `KUJAP_*` variables (and `.env`).
    pub fn new() -> anyhow::Result<Self> {
        let scraping_env = ScrapingEnv::load_from_env()?;
        let config = Self::from_env(scraping_env)?;
        Ok(config)
    }

    pub fn from_env(env: ScrapingEnv) -> Result<Self, ScrapeError> {
        let defaults = Self::default();
        let attachment_policy = match env.attachment_policy {
            Some(raw) => raw.parse()?,
            None => defaults.attachment_policy,
        };
        let config = Self {
            site_origin: env.site_origin.unwrap_or(defaults.site_origin),
            referer: env.referer.unwrap_or(defaults.referer),
            request_timeout: env
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            allow_empty_listing: env
                .allow_empty_listing
                .unwrap_or(defaults.allow_empty_listing),
            attachment_policy,
        };
        url::Url::parse(&config.site_origin)?;
        Ok(config)
    }

    pub fn with_site_origin(mut self, origin: impl Into<String>) -> Self {
        self.site_origin = origin.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_allow_empty_listing(mut self, allow: bool) -> Self {
        self.allow_empty_listing = allow;
        self
    }

    pub fn with_attachment_policy(mut self, policy: AttachmentPolicy) -> Self {
        self.attachment_policy = policy;
        self
    }

    fn origin(&self) -> &str {
        self.site_origin.trim_end_matches('/')
    }

    /// Listing page for a board, without pagination parameters.
    pub fn listing_base_url(&self, board_id: &str) -> String {
        format!(
            "{}/contents/bbs/bbs_list.html?bbs_cls_cd={}",
            self.origin(),
            board_id
        )
    }

    /// Prefix for the `bbs_content.html...` fragments found on listing pages.
    pub fn article_base_url(&self) -> String {
        format!("{}/contents/bbs/", self.origin())
    }

    pub fn download_url(&self, board_code: &str, content_id: &str, encoded_name: &str) -> String {
        format!(
            "{}/contents/common/popup/download.html?bbs_cls_cd={}&cid={}&file_nm={}&con_flg=Y&home_id=",
            self.origin(),
            board_code,
            content_id,
            encoded_name
        )
    }
}

// Extension trait.
pub trait LoadFromEnv: DeserializeOwned {
    fn load_from_env() -> anyhow::Result<Self> {
        // Don't throw an error if .env file doesn't exist.
        let _ = dotenv::dotenv();
        let config = envy::prefixed(ENV_PREFIX)
            .from_env::<Self>()
            .context("failed to load env variables into config struct")?;
        Ok(config)
    }
}

impl<T: DeserializeOwned> LoadFromEnv for T {}
