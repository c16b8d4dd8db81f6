//! Search-then-extract orchestration over a bounded worker pool.
//!
//! The search runs on one session; every result is then processed by its
//! own session built from the factory, so cookies and referers from one
//! post's redirect chain never leak into another. At most
//! `Options::max_workers` posts are in flight and reports come back in
//! search order.

use futures::stream::{self, StreamExt};
use tracing::{info, warn};

use crate::body::assemble_body;
use crate::error::Result;
use crate::fetch::{HttpSession, PageFetcher, Transport};
use crate::keywords::KeywordRanker;
use crate::options::Options;
use crate::result::{PostReport, SearchResult};
use crate::search::search;

/// Builds one transport per crawl unit.
pub type SessionFactory<T> = Box<dyn Fn(&Options) -> Result<T> + Send + Sync>;

/// Crawler over real HTTP sessions.
pub type HttpCrawler = Crawler<HttpSession>;

pub struct Crawler<T: Transport> {
    factory: SessionFactory<T>,
    options: Options,
}

impl Crawler<HttpSession> {
    /// Crawler building a fresh [`HttpSession`] per unit.
    #[must_use]
    pub fn http(options: Options) -> Self {
        Self::new(HttpSession::new, options)
    }
}

impl<T: Transport> Crawler<T> {
    #[must_use]
    pub fn new<F>(factory: F, options: Options) -> Self
    where
        F: Fn(&Options) -> Result<T> + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            options,
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Top `n` search results for `keyword`.
    ///
    /// Fails only if the session cannot be built; search failures give an
    /// empty list.
    pub async fn search(&self, keyword: &str, n: usize) -> Result<Vec<SearchResult>> {
        let session = (self.factory)(&self.options)?;
        Ok(search(&session, keyword, n, &self.options).await)
    }

    /// Fetch, assemble, and rank one result.
    pub async fn process(&self, rank: usize, result: &SearchResult) -> PostReport {
        let session = match (self.factory)(&self.options) {
            Ok(session) => session,
            Err(err) => {
                warn!(rank, url = %result.url, error = %err, "cannot create session");
                return PostReport::failed(rank, result, format!("session unavailable: {err}"));
            }
        };

        let Some(page) = PageFetcher::new(&session, &self.options).fetch(&result.url).await else {
            warn!(rank, url = %result.url, "page unavailable");
            return PostReport::failed(rank, result, "page unavailable");
        };

        let Some(body) = assemble_body(&page, &self.options) else {
            warn!(rank, url = %result.url, source = ?page.source, "no body found");
            return PostReport {
                source: Some(page.source),
                ..PostReport::failed(rank, result, "no body found")
            };
        };

        let keywords = KeywordRanker::from_options(&self.options)
            .rank_top(&body, self.options.keyword_top_n);
        info!(
            rank,
            url = %result.url,
            chars = body.chars().count(),
            keywords = keywords.len(),
            "post processed"
        );

        PostReport {
            rank,
            title: result.title.clone(),
            url: result.url.clone(),
            source: Some(page.source),
            body: Some(body),
            keywords,
            error: None,
        }
    }

    /// Process `results` with bounded concurrency; ranks are 1-based positions.
    pub async fn process_all(&self, results: &[SearchResult]) -> Vec<PostReport> {
        let workers = self.options.max_workers.max(1);
        stream::iter(results.iter().enumerate())
            .map(|(i, result)| self.process(i + 1, result))
            .buffered(workers)
            .collect()
            .await
    }

    /// Search `keyword` and process the top `n` results.
    pub async fn crawl(&self, keyword: &str, n: usize) -> Result<Vec<PostReport>> {
        let results = self.search(keyword, n).await?;
        info!(keyword, results = results.len(), "processing search results");
        let reports = self.process_all(&results).await;
        let succeeded = reports.iter().filter(|r| r.is_success()).count();
        info!(keyword, succeeded, failed = reports.len() - succeeded, "crawl finished");
        Ok(reports)
    }
}
