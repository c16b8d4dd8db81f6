//! # rs-blogscrape
//!
//! Blog search scraping and post body extraction.
//!
//! Given a keyword, the crate finds the top blog posts on the search results
//! page, fetches each post through a desktop → content frame → mobile
//! fallback chain, linearizes the post body with positional media markers
//! (`[Image N]`, `[Link N]`, `[Sticker N]`), and ranks the body's keywords.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_blogscrape::extract_body;
//!
//! let html = r#"<html><body>
//!   <div class="se-main-container">
//!     <p>첫 문단입니다.</p><img src="a.png"><p>둘째 문단입니다.</p>
//!   </div>
//! </body></html>"#;
//!
//! let body = extract_body(html).unwrap_or_default();
//! assert!(body.contains("[Image 1]"));
//! ```
//!
//! Network work goes through [`Transport`]; [`HttpSession`] is the
//! `reqwest` implementation and [`crawl::Crawler`] runs the whole pipeline
//! over a bounded worker pool.
//!
//! ## Failure model
//!
//! Pipeline entry points return sentinels rather than errors: a page that
//! cannot be fetched is `None`, a failed search is an empty list, a body that
//! no strategy finds is `None`. Every fallback decision is logged through
//! `tracing`.

mod error;
mod options;
mod patterns;
mod result;

/// dom_query adapter: attribute helpers, ancestor lookup, text linearization.
pub mod dom;

/// Block page detection.
pub mod block;

/// Compiled URL heuristics: post links, post ids, frame and mobile URLs.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Rules and ordered strategy chains for titles and bodies.
pub mod selector;

/// Media-marker linearization of post subtrees.
pub mod markers;

/// Body text assembly, dedup, and container diagnostics.
pub mod body;

/// Transport trait, HTTP session, pacing, and the page fallback chain.
pub mod fetch;

/// Search results parsing.
pub mod search;

/// Keyword ranking.
pub mod keywords;

/// Search-then-extract orchestration.
pub mod crawl;

/// Run directory and file export.
pub mod export;

/// `tracing` subscriber setup.
pub mod observability;

// Public API - re-exports
pub use block::is_blocked;
pub use body::assemble_body;
pub use crawl::{Crawler, HttpCrawler};
pub use error::{Error, Result};
pub use fetch::{FetchedPage, HttpResponse, HttpSession, PageFetcher, PageSource, RequestOpts, Transport};
pub use keywords::{KeywordRanker, SimpleTokenizer, Tokenizer};
pub use markers::{extract_with_markers, MarkerCounter, MarkerKind};
pub use options::Options;
pub use result::{KeywordEntry, KeywordStat, PostReport, SearchResult};
pub use search::search;

/// Assembles the body text of a post page using default options.
///
/// Returns `None` when no strategy finds text.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::extract_body;
///
/// let html = r#"<div id="post-view"><p>본문 내용입니다</p></div>"#;
/// assert_eq!(extract_body(html).as_deref(), Some("본문 내용입니다"));
/// ```
#[must_use]
pub fn extract_body(html: &str) -> Option<String> {
    extract_body_with_options(html, &Options::default())
}

/// Assembles the body text of a post page with custom options.
#[must_use]
pub fn extract_body_with_options(html: &str, options: &Options) -> Option<String> {
    let doc = dom::parse(html);
    body::assemble_body_from_document(&doc, options)
}

/// Assembles the body text from raw bytes, detecting the charset first.
///
/// The charset comes from the `content_type` header value when given,
/// then from a `<meta>` declaration, and defaults to UTF-8.
#[must_use]
pub fn extract_body_bytes(bytes: &[u8], content_type: Option<&str>) -> Option<String> {
    let html = encoding::decode_body(bytes, content_type);
    extract_body(&html)
}
