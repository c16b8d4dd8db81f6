//! Result types produced by the pipeline.
//!
//! All of these are plain request-scoped data; nothing here holds a
//! document or a session.

use serde::{Deserialize, Serialize};

use crate::fetch::PageSource;

/// One post found on a search results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Display title, trimmed and at most `Options::title_max_chars` characters.
    pub title: String,

    /// Absolute post URL on the blog host.
    pub url: String,
}

/// One ranked keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordEntry {
    pub keyword: String,

    /// Occurrences in the text, at least the ranking's minimum count.
    pub count: usize,

    /// 1-based position after sorting by count; ties keep encounter order.
    pub rank: usize,
}

/// Count and rank of one keyword, as stored in a ranking map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordStat {
    pub count: usize,
    pub rank: usize,
}

/// Outcome of crawling one search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostReport {
    /// 1-based position in the search results.
    pub rank: usize,

    pub title: String,

    pub url: String,

    /// Stage that produced the page, when it was fetched.
    pub source: Option<PageSource>,

    /// Assembled body text, if any strategy found one.
    pub body: Option<String>,

    /// Top keywords of the body.
    pub keywords: Vec<KeywordEntry>,

    /// Why the post produced no body.
    pub error: Option<String>,
}

impl PostReport {
    /// Report for a result whose page or body could not be obtained.
    #[must_use]
    pub fn failed(rank: usize, result: &SearchResult, error: impl Into<String>) -> Self {
        Self {
            rank,
            title: result.title.clone(),
            url: result.url.clone(),
            source: None,
            body: None,
            keywords: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Whether a body was extracted.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.body.is_some()
    }
}
