use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    category::{Category, classify},
    config::{AttachmentPolicy, ScrapingConfig},
    error::ScrapeError,
    scraping_context::ScrapingContext,
    text_manipulators::{absolutize_links, rewrite_download_links},
};

/// A parsed notice.
///
/// `url` and `category` are empty straight out of the parser and filled in
/// once by [`ArticleRecord::classified`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    /// First token of the date cell, e.g. `2024-08-19`.
    pub date: String,
    pub writer: String,
    /// Body HTML with absolute links and rewritten attachment downloads.
    pub content: String,
    pub url: String,
    pub category: String,
}

impl ArticleRecord {
    pub fn classified(self, url: impl Into<String>, category: Category) -> Self {
        let category = classify(&self.title, category);
        Self {
            url: url.into(),
            category,
            ..self
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.url.is_empty() && !self.category.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ArticleScraper {
    pub url: String,
    pub category: Category,
}

impl ArticleScraper {
    pub fn new(url: impl Into<String>, category: Category) -> Self {
        Self {
            url: url.into(),
            category,
        }
    }

    pub fn from_code(url: impl Into<String>, category_code: i64) -> Result<Self, ScrapeError> {
        Ok(Self::new(url, Category::try_from(category_code)?))
    }

    /// Fetches and parses the article, leaving `url` and `category` blank.
    pub async fn parse(&self, ctx: &ScrapingContext) -> Result<ArticleRecord, ScrapeError> {
        let html = ctx.request_client.fetch_url_body(&self.url).await?;
        let record = parse_article_html(&html, &ctx.scraping_config)?;
        info!("parsed \"{}\" from {}", record.title, self.url);
        Ok(record)
    }

    /// Fetches, parses and classifies the article.
    pub async fn scrape(&self, ctx: &ScrapingContext) -> Result<ArticleRecord, ScrapeError> {
        let record = self.parse(ctx).await?;
        Ok(record.classified(self.url.clone(), self.category))
    }
}

/// Parses a decoded article page. Any missing field fails the whole parse.
pub fn parse_article_html(
    html: &str,
    config: &ScrapingConfig,
) -> Result<ArticleRecord, ScrapeError> {
    let parser = ArticleParser::new()?;
    Ok(ArticleRecord {
        title: parser.title(html)?,
        date: parser.date(html)?,
        writer: parser.writer(html)?,
        content: parser.content(html, config)?,
        url: String::new(),
        category: String::new(),
    })
}

/// Markers of the fields on an article page, one regex per field.
pub struct ArticleParser {
    title_regex: Regex,
    title_padding_regex: Regex,
    date_regex: Regex,
    writer_regex: Regex,
    content_regex: Regex,
    file_section_regex: Regex,
}

impl ArticleParser {
    pub fn new() -> Result<Self, ScrapeError> {
        Ok(Self {
            title_regex: Regex::new(r"<td class='pd5t b' id='head'>(.+?)</td>")?,
            title_padding_regex: Regex::new(r"\s{2,}(&nbsp)?")?,
            date_regex: Regex::new(r"<td align='right' class='pd5'>(.+?)</td>")?,
            writer_regex: Regex::new(r"<td class='small pd5 b letter'>(.+?)</td>")?,
            content_regex: Regex::new(r"(?s)<td class='pd10t'(.+?)</ul>")?,
            file_section_regex: Regex::new(r"(?s)<ul id='file'>(.*?)</ul>")?,
        })
    }

    fn capture<'h>(regex: &Regex, html: &'h str) -> Option<&'h str> {
        regex.captures(html).and_then(|caps| caps.get(1)).map(|m| m.as_str())
    }

    /// The head cell, minus its leading `      &nbsp;` padding.
    pub fn title(&self, html: &str) -> Result<String, ScrapeError> {
        let raw = Self::capture(&self.title_regex, html).ok_or(ScrapeError::TitleNotFound)?;
        let title = self
            .title_padding_regex
            .replacen(raw, 1, "")
            .replacen(';', "", 1);
        if title.is_empty() {
            return Err(ScrapeError::TitleNotFound);
        }
        Ok(title)
    }

    pub fn date(&self, html: &str) -> Result<String, ScrapeError> {
        Self::capture(&self.date_regex, html)
            .and_then(|raw| raw.split_whitespace().next())
            .map(str::to_string)
            .ok_or(ScrapeError::DateNotFound)
    }

    pub fn writer(&self, html: &str) -> Result<String, ScrapeError> {
        Self::capture(&self.writer_regex, html)
            .map(str::to_string)
            .ok_or(ScrapeError::WriterNotFound)
    }

    /// The body cell through the end of its attachment list.
    ///
    /// Links in the body are made absolute and the original attachment list
    /// is replaced by a rewritten copy appended at the end.
    pub fn content(&self, html: &str, config: &ScrapingConfig) -> Result<String, ScrapeError> {
        let region = self
            .content_regex
            .find(html)
            .ok_or(ScrapeError::ContentNotFound)?
            .as_str();

        let attachments = match self.file_section_regex.find(region) {
            Some(section) => rewrite_download_links(section.as_str(), config)?,
            None if config.attachment_policy == AttachmentPolicy::Optional => {
                debug!("no attachment list, treating as zero attachments");
                String::new()
            }
            None => return Err(ScrapeError::FileSectionNotFound),
        };

        let origin = Url::parse(&config.site_origin)?;
        let body = absolutize_links(region, &origin)?;
        let body = self.file_section_regex.replacen(&body, 1, "");
        Ok(format!("{body}{attachments}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"<table width='100%'>
<tr><td class='pd5t b' id='head'>      &nbsp;2024학년도 2학기 국가장학금 신청 안내</td></tr>
<tr><td class='small pd5 b letter'>학생지원팀</td><td align='right' class='pd5'>2024-08-19 10:31:05</td></tr>
<tr><td class='pd10t' colspan='2'>
<p>자세한 내용은 <a href="/contents/guide/scholar.html">안내 페이지</a>를 참고하세요.</p>
<img src="/upload/bbs/poster.jpg" alt="poster">
<ul id='file'>
<li><img src='/images/common/ico_file.gif'> <a href="javascript:fnDownFile('005003001','4821','자료.pdf');">자료.pdf</a></li>
</ul>
</td></tr>
</table>"#;

    fn parser() -> ArticleParser {
        ArticleParser::new().unwrap()
    }

    #[test]
    fn parses_every_field() {
        let record = parse_article_html(ARTICLE, &ScrapingConfig::default()).unwrap();
        assert_eq!(record.title, "2024학년도 2학기 국가장학금 신청 안내");
        assert_eq!(record.date, "2024-08-19");
        assert_eq!(record.writer, "학생지원팀");
        assert!(record.url.is_empty());
        assert!(record.category.is_empty());
        assert!(!record.is_complete());
    }

    #[test]
    fn title_padding_and_semicolon_are_stripped() {
        let html = "<td class='pd5t b' id='head'>   &nbsp;학위수여식 안내</td>";
        assert_eq!(parser().title(html).unwrap(), "학위수여식 안내");
    }

    #[test]
    fn missing_title_fails_the_parse() {
        let html = ARTICLE.replace("id='head'", "id='heading'");
        assert!(matches!(
            parse_article_html(&html, &ScrapingConfig::default()),
            Err(ScrapeError::TitleNotFound)
        ));
    }

    #[test]
    fn missing_date_and_writer_fail() {
        assert!(matches!(parser().date("<td>none</td>"), Err(ScrapeError::DateNotFound)));
        assert!(matches!(
            parser().writer("<td>none</td>"),
            Err(ScrapeError::WriterNotFound)
        ));
    }

    #[test]
    fn date_keeps_first_token() {
        let html = "<td align='right' class='pd5'>2023-03-02 09:00</td>";
        assert_eq!(parser().date(html).unwrap(), "2023-03-02");
    }

    #[test]
    fn content_links_are_absolute() {
        let content = parser().content(ARTICLE, &ScrapingConfig::default()).unwrap();
        assert!(content.starts_with("<td class='pd10t'"));
        assert!(content.contains(r#"href="http://www.kujap.com/contents/guide/scholar.html""#));
        assert!(content.contains(r#"src="http://www.kujap.com/upload/bbs/poster.jpg""#));
    }

    #[test]
    fn attachment_list_is_rewritten_and_moved_to_the_end() {
        let content = parser().content(ARTICLE, &ScrapingConfig::default()).unwrap();
        assert_eq!(content.matches("<ul id='file'>").count(), 1);
        assert!(content.ends_with(concat!(
            "<ul id='file'>\n<li> ",
            r#"<a href="http://www.kujap.com/contents/common/popup/download.html?bbs_cls_cd=005003001&cid=4821&file_nm=%C0%DA%B7%E1.pdf&con_flg=Y&home_id=">"#,
            "자료.pdf</a></li>\n</ul>"
        )));
        assert!(!content.contains("ico_file.gif"));
        assert!(!content.contains("javascript:"));
    }

    #[test]
    fn missing_content_region_fails() {
        let html = ARTICLE.replace("class='pd10t'", "class='pd20t'");
        assert!(matches!(
            parser().content(&html, &ScrapingConfig::default()),
            Err(ScrapeError::ContentNotFound)
        ));
    }

    #[test]
    fn missing_attachment_list_follows_policy() {
        let html = ARTICLE.replace("<ul id='file'>", "<ul class='links'>");
        assert!(matches!(
            parser().content(&html, &ScrapingConfig::default()),
            Err(ScrapeError::FileSectionNotFound)
        ));

        let lenient = ScrapingConfig::default().with_attachment_policy(AttachmentPolicy::Optional);
        let content = parser().content(&html, &lenient).unwrap();
        assert!(content.ends_with("</ul>"));
        assert!(content.contains("<ul class='links'>"));
        assert!(!content.contains("download.html"));
    }

    #[test]
    fn classification_completes_the_record() {
        let record = parse_article_html(ARTICLE, &ScrapingConfig::default())
            .unwrap()
            .classified(
                "http://www.kujap.com/contents/bbs/bbs_content.html?cid=4821&type=B",
                Category::Undergraduate,
            );
        assert_eq!(record.category, "학부 장학");
        assert!(record.is_complete());
    }

    #[test]
    fn invalid_category_code_is_rejected() {
        assert!(matches!(
            ArticleScraper::from_code("http://www.kujap.com/x", 7),
            Err(ScrapeError::InvalidCategory(7))
        ));
    }
}
