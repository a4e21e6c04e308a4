use regex::{Captures, Regex};
use url::Url;

use crate::{charset::encode_file_name, config::ScrapingConfig, error::ScrapeError};

/// Resolves relative `href`/`src` values in `fragment` against `origin`.
///
/// Values that already carry a scheme (`http:`, `javascript:`, `mailto:`...),
/// protocol-relative values and bare fragments are left as they are.
pub fn absolutize_links(fragment: &str, origin: &Url) -> Result<String, ScrapeError> {
    let attr_regex = Regex::new(r#"(href|src)=(?:"([^"]*)"|'([^']*)')"#)?;
    let rewritten = attr_regex.replace_all(fragment, |caps: &Captures| {
        let (value, quote) = match (caps.get(2), caps.get(3)) {
            (Some(v), _) => (v.as_str(), '"'),
            (None, Some(v)) => (v.as_str(), '\''),
            (None, None) => return caps[0].to_string(),
        };
        if !is_relative(value) {
            return caps[0].to_string();
        }
        match origin.join(value) {
            Ok(resolved) => format!("{}={quote}{resolved}{quote}", &caps[1]),
            Err(_) => caps[0].to_string(),
        }
    });
    Ok(rewritten.into_owned())
}

fn is_relative(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with("//")
        && !value.starts_with('#')
        && Url::parse(value).is_err()
}

/// Turns the `fnDownFile(...)` script links of an attachment list into plain
/// download links and drops every `<img>` in it.
pub fn rewrite_download_links(
    file_section: &str,
    config: &ScrapingConfig,
) -> Result<String, ScrapeError> {
    let download_regex =
        Regex::new(r#"<a href="javascript:fnDownFile\('([^']+)','([^']+)','([^']+)'\);">"#)?;
    let image_regex = Regex::new(r"<img[^>]*>")?;

    let linked = download_regex.replace_all(file_section, |caps: &Captures| {
        let url = config.download_url(&caps[1], &caps[2], &encode_file_name(&caps[3]));
        format!(r#"<a href="{url}">"#)
    });
    Ok(image_regex.replace_all(&linked, "").into_owned())
}
