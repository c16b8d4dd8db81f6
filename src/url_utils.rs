//! URL Utility Functions
//!
//! Absolutization, host checks, post-link classification, and the URL
//! rewrites used by the fetch fallback chain (frame source, mobile variant).

use url::Url;

use crate::options::Options;

/// Make a search-result `href` absolute.
///
/// Protocol-relative hrefs get `https:`, site-relative paths are joined to
/// the blog origin, `http(s)` URLs pass through. Anything else (fragments,
/// `javascript:`, bare paths) is rejected.
#[must_use]
pub fn absolutize_href(href: &str, options: &Options) -> Option<String> {
    let href = href.trim();
    if let Some(rest) = href.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if href.starts_with('/') {
        return Some(format!("{}{href}", options.blog_origin()));
    }
    if href.starts_with("http") {
        return Some(href.to_string());
    }
    None
}

/// Whether `url` is hosted on `host` or one of its subdomains.
#[must_use]
pub fn is_target_host(url: &str, host: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let Some(actual) = parsed.host_str() else {
        return false;
    };
    let actual = actual.to_ascii_lowercase();
    let host = host.to_ascii_lowercase();
    actual == host || actual.ends_with(&format!(".{host}"))
}

/// Non-empty path segments of `url`.
#[must_use]
pub fn path_segments(url: &Url) -> Vec<String> {
    url.path()
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether an absolute URL points at a post rather than a profile or listing.
///
/// A post has more than one path segment, or names the legacy post-view
/// endpoint anywhere in the URL.
#[must_use]
pub fn is_post_link(url: &str) -> bool {
    if url.to_lowercase().contains("postview") {
        return true;
    }
    Url::parse(url).is_ok_and(|u| path_segments(&u).len() > 1)
}

/// Resolve an embedded frame `src` to an absolute URL.
///
/// Protocol-relative sources get `https:`, absolute ones pass through,
/// everything else is treated as relative to the blog origin.
#[must_use]
pub fn resolve_frame_src(src: &str, options: &Options) -> String {
    let src = src.trim();
    if let Some(rest) = src.strip_prefix("//") {
        return format!("https://{rest}");
    }
    if src.starts_with("http") {
        return src.to_string();
    }
    let origin = options.blog_origin();
    match Url::parse(&origin).and_then(|base| base.join(src)) {
        Ok(joined) => joined.to_string(),
        Err(_) => format!("{origin}/{}", src.trim_start_matches('/')),
    }
}

/// Query parameter value by name.
#[must_use]
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Derive `(blog_id, log_no)` from a post URL.
///
/// Path form `/<blog_id>/.../<log_no>` first; `blogId` and `logNo` query
/// parameters override the path values when present.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::url_utils::post_ids;
///
/// assert_eq!(
///     post_ids("https://blog.naver.com/myblog/12345"),
///     Some(("myblog".to_string(), "12345".to_string()))
/// );
/// assert_eq!(
///     post_ids("https://blog.naver.com/PostView.naver?blogId=a&logNo=9"),
///     Some(("a".to_string(), "9".to_string()))
/// );
/// ```
#[must_use]
pub fn post_ids(url: &str) -> Option<(String, String)> {
    let parsed = Url::parse(url).ok()?;
    let segments = path_segments(&parsed);
    let (mut blog_id, mut log_no) = if segments.len() >= 2 {
        (segments.first().cloned(), segments.last().cloned())
    } else {
        (None, None)
    };
    if let Some(id) = query_param(&parsed, "blogId") {
        blog_id = Some(id);
    }
    if let Some(no) = query_param(&parsed, "logNo") {
        log_no = Some(no);
    }
    Some((blog_id?, log_no?))
}

/// Mobile variant of a post URL plus the referer to send with it.
#[must_use]
pub fn mobile_post_url(url: &str, options: &Options) -> Option<(String, String)> {
    let (blog_id, log_no) = post_ids(url)?;
    let mobile = format!("https://{}/{blog_id}/{log_no}", options.mobile_host);
    let referer = format!("{}/{blog_id}", options.blog_origin());
    Some((mobile, referer))
}

/// Whether `url` is a search redirect that must be followed before fetching.
#[must_use]
pub fn is_search_redirect(url: &str, options: &Options) -> bool {
    options
        .search_redirect_markers
        .iter()
        .any(|marker| url.contains(marker.as_str()))
}

/// Numeric post id used for export file names.
///
/// Last path segment when it is all digits, otherwise the `logNo` parameter.
#[must_use]
pub fn post_number(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if let Some(last) = path_segments(&parsed).last() {
        if last.chars().all(|c| c.is_ascii_digit()) {
            return Some(last.clone());
        }
    }
    query_param(&parsed, "logNo")
}
