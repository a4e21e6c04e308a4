use std::fmt::Write;

use encoding_rs::EUC_KR;
use log::warn;

/// Decodes an EUC-KR page body.
///
/// Decoding is lossy: malformed sequences become U+FFFD instead of failing
/// the whole page, since the site occasionally serves broken bytes.
pub fn decode_euc_kr(bytes: &[u8]) -> String {
    let (text, had_errors) = EUC_KR.decode_without_bom_handling(bytes);
    if had_errors {
        warn!("body contained malformed EUC-KR sequences ({} bytes)", bytes.len());
    }
    text.into_owned()
}

// Marks `encodeURIComponent` leaves alone on top of urlencoding's set.
const EXTRA_UNRESERVED: [char; 5] = ['!', '\'', '(', ')', '*'];

/// Percent-encodes a download file name the way the site's download
/// endpoint expects it.
///
/// Non-ASCII characters are encoded to EUC-KR and every byte becomes an
/// uppercase `%XX` escape. ASCII characters follow `encodeURIComponent`.
/// Characters with no EUC-KR mapping encode as `%3F` (`?`).
pub fn encode_file_name(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len() * 3);
    let mut buf = [0u8; 4];
    for ch in raw.chars() {
        if ch.is_ascii() {
            if EXTRA_UNRESERVED.contains(&ch) {
                encoded.push(ch);
            } else {
                encoded.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
            }
            continue;
        }

        let (bytes, _, unmappable) = EUC_KR.encode(ch.encode_utf8(&mut buf));
        if unmappable {
            encoded.push_str("%3F");
            continue;
        }
        for byte in bytes.iter() {
            // Writing into a String cannot fail.
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}
