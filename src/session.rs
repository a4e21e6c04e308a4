use log::{debug, info};
use regex::Regex;
use reqwest::header::SET_COOKIE;

use crate::{error::ScrapeError, requests::RequestClient};

/// Primes a listing URL and returns the `PHPSESSID` the site hands out.
///
/// The listing endpoint errors out on requests without this cookie.
pub async fn acquire_session(
    client: &RequestClient,
    listing_base_url: &str,
) -> Result<String, ScrapeError> {
    let response = client.fetch_board_response(listing_base_url, None).await?;
    let cookies: Vec<String> = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect();
    debug!("{} Set-Cookie header(s) from {}", cookies.len(), listing_base_url);

    let token = extract_session_token(&cookies, listing_base_url)?;
    info!("acquired session for {}", listing_base_url);
    Ok(token)
}

pub(crate) fn extract_session_token(
    cookies: &[String],
    url: &str,
) -> Result<String, ScrapeError> {
    if cookies.is_empty() {
        return Err(ScrapeError::NoCookie {
            url: url.to_string(),
        });
    }
    let session_regex = Regex::new(r"PHPSESSID=(.+?);")?;
    cookies
        .iter()
        .find_map(|cookie| session_regex.captures(cookie))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ScrapeError::NoSessionToken {
            url: url.to_string(),
        })
}
