//! Search results parsing.
//!
//! Scans every `<a href>` of a results page in document order and keeps
//! genuine post links: on the blog host, outside advertisement blocks,
//! absolute, post-shaped, and not seen before. Titles come from the static
//! heuristics in [`crate::selector::title`]; links without one are resolved
//! by fetching the post, and dropped if that fails too.

use std::collections::HashSet;

use dom_query::Selection;
use tracing::{debug, info, warn};
use url::Url;

use crate::dom;
use crate::error::{Error, Result};
use crate::fetch::{get_success, PageFetcher, Pacer, RequestOpts, Transport};
use crate::options::Options;
use crate::patterns::ADVERTISEMENT_TOKEN;
use crate::result::SearchResult;
use crate::selector::first_success;
use crate::selector::title::{title_from_page, truncate_title, TitleContext, TITLE_STRATEGIES};
use crate::url_utils::{absolutize_href, is_post_link, is_target_host};

/// Block elements checked for advertisement markers.
pub const AD_BLOCK_TAGS: &[&str] = &["div", "li", "article", "section"];

/// A post link found on a results page, title possibly unresolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub title: Option<String>,
}

/// Whether the nearest block around `link` is marked as an advertisement.
#[must_use]
pub fn is_advertisement(link: &Selection) -> bool {
    dom::nearest_ancestor_with_tag(link, AD_BLOCK_TAGS).is_some_and(|block| {
        dom::class_and_id_tokens(&block)
            .iter()
            .any(|token| ADVERTISEMENT_TOKEN.is_match(token))
    })
}

/// Search endpoint URL for `keyword`.
pub fn search_url(keyword: &str, options: &Options) -> Result<Url> {
    let params = std::iter::once(("query", keyword))
        .chain(options.search_params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    Url::parse_with_params(&options.search_url, params)
        .map_err(|err| Error::InvalidUrl(format!("{}: {err}", options.search_url)))
}

/// Every qualifying post link in `html`, in document order, deduplicated.
///
/// Titles are resolved with the static heuristics only.
#[must_use]
pub fn collect_candidates(html: &str, options: &Options) -> Vec<Candidate> {
    let doc = dom::parse(html);
    let host = options.blog_host.to_lowercase();
    let mut seen: HashSet<String> = HashSet::new();
    let mut candidates = Vec::new();

    for node in doc.select("a[href]").nodes() {
        let link = Selection::from(*node);
        let Some(href) = dom::get_attribute(&link, "href") else {
            continue;
        };
        if !href.to_lowercase().contains(&host) {
            continue;
        }
        if is_advertisement(&link) {
            debug!(href = %href, "skipping advertisement link");
            continue;
        }
        let Some(url) = absolutize_href(&href, options) else {
            continue;
        };
        if !is_target_host(&url, &options.blog_host) || !is_post_link(&url) {
            continue;
        }
        if !seen.insert(url.clone()) {
            continue;
        }

        let ctx = TitleContext::new(link, options);
        let title = first_success(&TITLE_STRATEGIES, &ctx);
        candidates.push(Candidate { url, title });
    }

    candidates
}

/// Resolve a title by fetching the post itself.
pub async fn title_from_post<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    options: &Options,
) -> Option<String> {
    let page = PageFetcher::new(transport, options).fetch(url).await?;
    let doc = page.document();
    title_from_page(&doc, options)
}

/// Search `keyword` and return up to `n` post results.
///
/// Any failure fetching the results page yields an empty list.
pub async fn search<T: Transport + ?Sized>(
    transport: &T,
    keyword: &str,
    n: usize,
    options: &Options,
) -> Vec<SearchResult> {
    if n == 0 {
        return Vec::new();
    }

    let url = match search_url(keyword, options) {
        Ok(url) => url,
        Err(err) => {
            warn!(search_url = %options.search_url, error = %err, "invalid search endpoint");
            return Vec::new();
        }
    };

    Pacer::from_options(options).primary().await;
    let page = match get_success(transport, url.as_str(), RequestOpts::default()).await {
        Ok(page) => page,
        Err(err) => {
            warn!(keyword, error = %err, "search request failed");
            return Vec::new();
        }
    };

    if !page.body.to_lowercase().contains(&options.blog_host.to_lowercase()) {
        info!(keyword, "results page has no blog links");
        return Vec::new();
    }

    let candidates = collect_candidates(&page.body, options);
    debug!(keyword, candidates = candidates.len(), "post links found");

    let mut results = Vec::with_capacity(n);
    for candidate in candidates {
        if results.len() >= n {
            break;
        }
        let title = match candidate.title {
            Some(title) => title,
            None => {
                debug!(url = %candidate.url, "no title on results page, fetching post");
                match title_from_post(transport, &candidate.url, options).await {
                    Some(title) => title,
                    None => {
                        debug!(url = %candidate.url, "title unresolved, skipping link");
                        continue;
                    }
                }
            }
        };
        results.push(SearchResult {
            title: truncate_title(&title, options.title_max_chars),
            url: candidate.url,
        });
    }

    info!(keyword, found = results.len(), requested = n, "search finished");
    results
}
