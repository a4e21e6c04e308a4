#![allow(dead_code)]

use std::sync::Once;
use std::time::Duration;

use encoding_rs::EUC_KR;
use kujap_scraper::{ScrapingConfig, ScrapingContext};
use wiremock::ResponseTemplate;

static INIT: Once = Once::new();

pub const SESSION_ID: &str = "9f3c2a7be1d04";
pub const LISTING_PATH: &str = "/contents/bbs/bbs_list.html";
pub const ARTICLE_PATH: &str = "/contents/bbs/bbs_content.html";

pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn context_for(origin: &str) -> ScrapingContext {
    init_test_logging();
    let config = ScrapingConfig::default()
        .with_site_origin(origin)
        .with_request_timeout(Duration::from_secs(5));
    ScrapingContext::with_config(config).unwrap()
}

pub fn euc_kr_page(html: &str) -> ResponseTemplate {
    let (bytes, _, unmappable) = EUC_KR.encode(html);
    assert!(!unmappable, "fixture must be EUC-KR encodable");
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=euc-kr")
        .set_body_bytes(bytes.into_owned())
}

pub fn session_response() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("set-cookie", format!("PHPSESSID={SESSION_ID}; path=/").as_str())
        .set_body_string("<html></html>")
}

pub fn listing_page(board_id: &str, cids: &[u32]) -> String {
    let rows: String = cids
        .iter()
        .map(|cid| {
            format!(
                "<tr><td class='subject'><a href=\"bbs_content.html?bbs_cls_cd={board_id}&cid={cid}&type=B\">공지 {cid}</a></td></tr>\n"
            )
        })
        .collect();
    format!("<html><body><table>\n{rows}</table></body></html>")
}

pub const ARTICLE_PAGE: &str = r#"<html><head><title>고려대학교 자유전공학부</title></head><body>
<table width='100%'>
<tr><td class='pd5t b' id='head'>      &nbsp;2024학년도 2학기 교내 장학생 선발 안내</td></tr>
<tr><td class='small pd5 b letter'>행정팀</td><td align='right' class='pd5'>2024-08-19 10:31:05</td></tr>
<tr><td class='pd10t' colspan='2'>
<p>첨부된 <a href="/contents/guide/scholar.html">신청서</a>를 제출하세요.</p>
<ul id='file'>
<li><img src='/images/common/ico_file.gif'> <a href="javascript:fnDownFile('005003001','4821','자료.pdf');">자료.pdf</a></li>
</ul>
</td></tr>
</table>
</body></html>"#;
