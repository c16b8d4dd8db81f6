//! Character encoding detection and transcoding of response bodies.
//!
//! Resolution order: `Content-Type` header charset, then an HTML meta
//! declaration in the first 1024 bytes, then UTF-8. Older blog skins still
//! serve EUC-KR, so transcoding is never skipped on a declared charset.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `charset=...` inside a `Content-Type` header value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Charset label declared by a `Content-Type` header value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Detect character encoding from HTML bytes.
///
/// Only examines the first 1024 bytes. Covers both `<meta charset>` and the
/// `http-equiv="Content-Type"` form since the pattern keys on `charset=`.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    let head = &html[..html.len().min(1024)];
    let head_str = String::from_utf8_lossy(head);

    CHARSET_META_RE
        .captures(&head_str)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode a response body to UTF-8.
///
/// Invalid sequences become U+FFFD instead of failing the fetch.
///
/// # Examples
///
/// ```
/// use rs_blogscrape::encoding::decode_body;
///
/// let body = "<p>안녕하세요</p>".as_bytes();
/// assert_eq!(decode_body(body, Some("text/html; charset=UTF-8")), "<p>안녕하세요</p>");
/// ```
#[must_use]
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .unwrap_or_else(|| detect_encoding(bytes));

    if encoding == UTF_8 {
        return String::from_utf8_lossy(bytes).into_owned();
    }

    let (decoded, _encoding_used, _had_errors) = encoding.decode(bytes);
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::EUC_KR;

    #[test]
    fn header_charset_is_parsed() {
        assert_eq!(charset_from_content_type("text/html; charset=EUC-KR"), Some(EUC_KR));
        assert_eq!(charset_from_content_type("text/html;charset=\"utf-8\""), Some(UTF_8));
        assert_eq!(charset_from_content_type("text/html"), None);
    }

    #[test]
    fn detect_from_meta_charset() {
        let html = br#"<html><head><meta charset="euc-kr"></head><body>x</body></html>"#;
        assert_eq!(detect_encoding(html), EUC_KR);
    }

    #[test]
    fn detect_from_http_equiv() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=EUC-KR">"#;
        assert_eq!(detect_encoding(html), EUC_KR);
    }

    #[test]
    fn default_to_utf8_when_no_charset() {
        assert_eq!(detect_encoding(b"<html><body>Test</body></html>"), UTF_8);
    }

    #[test]
    fn decode_euc_kr_body_from_header() {
        let (bytes, _, _) = EUC_KR.encode("<p>블로그</p>");
        assert_eq!(decode_body(&bytes, Some("text/html; charset=euc-kr")), "<p>블로그</p>");
    }

    #[test]
    fn header_wins_over_meta() {
        let html = "<meta charset=\"euc-kr\"><p>글</p>";
        assert_eq!(decode_body(html.as_bytes(), Some("text/html; charset=utf-8")), html);
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let result = decode_body(b"<body>Test \xFF\xFE Invalid</body>", None);
        assert!(result.contains("Test"));
        assert!(result.contains('\u{FFFD}'));
    }
}
