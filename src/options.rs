//! Configuration options for searching, fetching, and extraction.
//!
//! The `Options` struct carries every tunable of the pipeline. Defaults
//! target the Naver blog layouts; a TOML file and `BLOGSCRAPE_*` environment
//! variables can override any of them.

use std::collections::BTreeMap;
use std::env;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Configuration options for the scraping pipeline.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_blogscrape::Options;
///
/// let options = Options {
///     max_workers: 2,
///     timeout_secs: 10,
///     ..Options::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Search endpoint queried by [`crate::search`].
    ///
    /// Default: `https://search.naver.com/search.naver`
    pub search_url: String,

    /// Fixed query parameters sent with every search (the keyword is added as `query`).
    pub search_params: BTreeMap<String, String>,

    /// Host of the target blog platform.
    ///
    /// Default: `blog.naver.com`
    pub blog_host: String,

    /// Host of the mobile variant of the blog platform.
    ///
    /// Default: `m.blog.naver.com`
    pub mobile_host: String,

    /// Referer sent with the primary post request.
    pub search_referer: String,

    /// Substrings identifying a search-redirect URL that must be resolved first.
    pub search_redirect_markers: Vec<String>,

    /// User-agent pool. One entry is picked per session.
    pub user_agents: Vec<String>,

    /// `Accept-Language` header value.
    pub accept_language: String,

    /// Per-request timeout in seconds.
    ///
    /// Default: `15`
    pub timeout_secs: u64,

    /// Randomized delay range (milliseconds) before search and primary requests.
    ///
    /// Default: `[1000, 3000]`
    pub primary_delay_ms: [u64; 2],

    /// Randomized delay range (milliseconds) before redirect, frame, and mobile requests.
    ///
    /// Default: `[1000, 2000]`
    pub secondary_delay_ms: [u64; 2],

    /// Titles longer than this are truncated (characters).
    ///
    /// Default: `150`
    pub title_max_chars: usize,

    /// A title candidate is accepted only when longer than this (characters).
    ///
    /// Default: `2`
    pub title_min_exclusive: usize,

    /// Loose container heuristics accept text longer than this (characters).
    ///
    /// Default: `20`
    pub loose_container_threshold: usize,

    /// Whole-body fallback keeps lines longer than this (characters).
    ///
    /// Default: `5`
    pub fallback_line_threshold: usize,

    /// Maximum element nesting the marker walk descends before giving up.
    ///
    /// Default: `512`
    pub max_tree_depth: usize,

    /// Number of posts processed concurrently by the crawler.
    ///
    /// Default: `3`
    pub max_workers: usize,

    /// Minimum keyword length (characters) for ranking.
    ///
    /// Default: `2`
    pub keyword_min_length: usize,

    /// Minimum occurrence count for ranked keywords.
    ///
    /// Default: `2`
    pub keyword_min_count: usize,

    /// Number of ranked keywords kept per post (`0` keeps all).
    ///
    /// Default: `20`
    pub keyword_top_n: usize,
}

impl Default for Options {
    fn default() -> Self {
        let search_params = [("where", "nexearch"), ("sm", "top_hty"), ("fbm", "0"), ("ie", "utf8")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            search_url: "https://search.naver.com/search.naver".to_string(),
            search_params,
            blog_host: "blog.naver.com".to_string(),
            mobile_host: "m.blog.naver.com".to_string(),
            search_referer: "https://search.naver.com/".to_string(),
            search_redirect_markers: vec![
                "naver.com/search.naver".to_string(),
                "search.naver.com".to_string(),
            ],
            user_agents: vec![
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36".to_string(),
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
            ],
            accept_language: "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7".to_string(),
            timeout_secs: 15,
            primary_delay_ms: [1000, 3000],
            secondary_delay_ms: [1000, 2000],
            title_max_chars: 150,
            title_min_exclusive: 2,
            loose_container_threshold: 20,
            fallback_line_threshold: 5,
            max_tree_depth: 512,
            max_workers: 3,
            keyword_min_length: 2,
            keyword_min_count: 2,
            keyword_top_n: 20,
        }
    }
}

impl Options {
    /// Options with all request delays disabled.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            primary_delay_ms: [0, 0],
            secondary_delay_ms: [0, 0],
            ..Self::default()
        }
    }

    /// Parse options from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: Self = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Apply `BLOGSCRAPE_*` environment overrides.
    ///
    /// Recognized: `BLOGSCRAPE_BLOG_HOST`, `BLOGSCRAPE_MOBILE_HOST`,
    /// `BLOGSCRAPE_TIMEOUT_SECS`, `BLOGSCRAPE_MAX_WORKERS`, `BLOGSCRAPE_NO_DELAY`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = env::var("BLOGSCRAPE_BLOG_HOST") {
            self.blog_host = host;
        }
        if let Ok(host) = env::var("BLOGSCRAPE_MOBILE_HOST") {
            self.mobile_host = host;
        }
        if let Some(secs) = env::var("BLOGSCRAPE_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()) {
            self.timeout_secs = secs;
        }
        if let Some(workers) = env::var("BLOGSCRAPE_MAX_WORKERS").ok().and_then(|v| v.parse().ok()) {
            self.max_workers = workers;
        }
        if env::var("BLOGSCRAPE_NO_DELAY").is_ok_and(|v| matches!(v.as_str(), "1" | "true" | "yes")) {
            self.primary_delay_ms = [0, 0];
            self.secondary_delay_ms = [0, 0];
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.blog_host.trim().is_empty() {
            return Err(Error::Config("blog_host must not be empty".into()));
        }
        if self.user_agents.is_empty() {
            return Err(Error::Config("user_agents must contain at least one entry".into()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".into()));
        }
        if self.max_workers == 0 {
            return Err(Error::Config("max_workers must be at least 1".into()));
        }
        for (name, [lo, hi]) in [("primary_delay_ms", self.primary_delay_ms), ("secondary_delay_ms", self.secondary_delay_ms)] {
            if lo > hi {
                return Err(Error::Config(format!("{name}: lower bound {lo} exceeds upper bound {hi}")));
            }
        }
        Ok(())
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `https://<blog_host>` with no trailing slash.
    #[must_use]
    pub fn blog_origin(&self) -> String {
        format!("https://{}", self.blog_host)
    }
}
