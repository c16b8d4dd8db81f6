//! Page fetching with the desktop → frame → mobile fallback chain.
//!
//! The network sits behind the [`Transport`] trait so the chain can be
//! driven by [`HttpSession`] in production and by scripted fakes in tests.
//! Every stage failure is logged and folded into the next stage; the chain
//! itself never returns an error, only `None`.

use std::time::Duration;

use async_trait::async_trait;
use dom_query::Document;
use tracing::{debug, info, warn};

use crate::block;
use crate::dom;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::patterns::{MAIN_CONTAINER_CLASS, MAIN_FRAME_ID, POST_VIEW_ID};
use crate::url_utils::{is_search_redirect, mobile_post_url, resolve_frame_src};

mod pacer;
mod session;

pub use pacer::Pacer;
pub use session::HttpSession;

/// Per-request overrides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOpts<'a> {
    /// `Referer` header for this request only.
    pub referer: Option<&'a str>,
    /// Timeout replacing the session default.
    pub timeout: Option<Duration>,
}

impl<'a> RequestOpts<'a> {
    #[must_use]
    pub const fn with_referer(referer: &'a str) -> Self {
        Self {
            referer: Some(referer),
            timeout: None,
        }
    }
}

/// A received response, body already decoded to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// URL after redirects.
    pub final_url: String,
    pub body: String,
}

impl HttpResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Network transport consumed by the fetch chain and the search parser.
///
/// Non-2xx answers are returned as responses, not errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, opts: RequestOpts<'_>) -> Result<HttpResponse>;
}

/// GET that turns non-2xx statuses into [`Error::Status`].
pub async fn get_success<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    opts: RequestOpts<'_>,
) -> Result<HttpResponse> {
    let response = transport.get(url, opts).await?;
    if response.is_success() {
        Ok(response)
    } else {
        Err(Error::Status {
            status: response.status,
            url: url.to_string(),
        })
    }
}

/// Which stage of the chain produced a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSource {
    Primary,
    Frame,
    Mobile,
}

/// Page content returned by [`PageFetcher::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub html: String,
    pub final_url: String,
    pub source: PageSource,
}

impl FetchedPage {
    fn from_response(response: HttpResponse, source: PageSource) -> Self {
        Self {
            html: response.body,
            final_url: response.final_url,
            source,
        }
    }

    /// Parse the markup.
    #[must_use]
    pub fn document(&self) -> Document {
        dom::parse(&self.html)
    }

    /// Whether the markup mentions either known post container.
    #[must_use]
    pub fn has_post_signature(&self) -> bool {
        let lowered = self.html.to_lowercase();
        lowered.contains(POST_VIEW_ID) || lowered.contains(MAIN_CONTAINER_CLASS)
    }

    /// Absolute URL of the embedded content frame, if the page has one.
    #[must_use]
    pub fn frame_url(&self, options: &Options) -> Option<String> {
        let doc = self.document();
        let frame = dom::select_first_where(&doc.select("html"), "iframe", |s| {
            dom::id_contains_ignore_case(s, MAIN_FRAME_ID)
        })?;
        let src = dom::get_attribute(&frame, "src").filter(|s| !s.trim().is_empty())?;
        Some(resolve_frame_src(&src, options))
    }
}

/// Runs the fallback chain over one transport.
pub struct PageFetcher<'a, T: Transport + ?Sized> {
    transport: &'a T,
    options: &'a Options,
    pacer: Pacer,
}

impl<'a, T: Transport + ?Sized> PageFetcher<'a, T> {
    #[must_use]
    pub fn new(transport: &'a T, options: &'a Options) -> Self {
        Self {
            transport,
            options,
            pacer: Pacer::from_options(options),
        }
    }

    /// Fetch `url`, falling back to the embedded frame and the mobile page.
    ///
    /// 1. search redirects are resolved first (failure keeps the original URL)
    /// 2. the primary page must answer 2xx, otherwise `None`
    /// 3. a block notice on the primary page is only a warning
    /// 4. a `mainFrame` iframe replaces the page when it loads
    /// 5. without a post container signature the mobile page is tried;
    ///    a blocked mobile page is terminal, a failed one keeps the current page
    pub async fn fetch(&self, url: &str) -> Option<FetchedPage> {
        let target = self.resolve_redirect(url).await;

        self.pacer.primary().await;
        let primary = match get_success(
            self.transport,
            &target,
            RequestOpts::with_referer(&self.options.search_referer),
        )
        .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %target, error = %err, "primary fetch failed");
                return None;
            }
        };
        let mut page = FetchedPage::from_response(primary, PageSource::Primary);

        if let Some(signature) = block::matched_signature(&page.html) {
            warn!(url = %page.final_url, signature, "primary page looks blocked, trying fallbacks");
        }

        if let Some(frame_url) = page.frame_url(self.options) {
            if let Some(framed) = self.fetch_frame(&frame_url, &page.final_url).await {
                page = framed;
            }
        }

        if page.has_post_signature() {
            return Some(page);
        }
        self.fetch_mobile(page).await
    }

    async fn resolve_redirect(&self, url: &str) -> String {
        if !is_search_redirect(url, self.options) {
            return url.to_string();
        }
        self.pacer.secondary().await;
        match self.transport.get(url, RequestOpts::default()).await {
            Ok(response) => {
                debug!(from = url, to = %response.final_url, "search redirect resolved");
                response.final_url
            }
            Err(err) => {
                warn!(url, error = %err, "search redirect not resolved, using original url");
                url.to_string()
            }
        }
    }

    async fn fetch_frame(&self, frame_url: &str, referer: &str) -> Option<FetchedPage> {
        debug!(frame_url, "following content frame");
        self.pacer.secondary().await;
        match get_success(self.transport, frame_url, RequestOpts::with_referer(referer)).await {
            Ok(response) => {
                let page = FetchedPage::from_response(response, PageSource::Frame);
                if block::is_blocked(&page.html) {
                    warn!(url = %page.final_url, "frame page looks blocked, trying mobile");
                }
                Some(page)
            }
            Err(err) => {
                info!(frame_url, error = %err, "frame fetch failed, keeping primary page");
                None
            }
        }
    }

    async fn fetch_mobile(&self, current: FetchedPage) -> Option<FetchedPage> {
        let Some((mobile_url, referer)) = mobile_post_url(&current.final_url, self.options) else {
            debug!(url = %current.final_url, "no post ids for mobile fallback");
            return Some(current);
        };

        info!(mobile_url = %mobile_url, "no post container, retrying mobile page");
        self.pacer.secondary().await;
        match get_success(self.transport, &mobile_url, RequestOpts::with_referer(&referer)).await {
            Ok(response) => {
                let page = FetchedPage::from_response(response, PageSource::Mobile);
                if block::is_blocked(&page.html) {
                    warn!(url = %page.final_url, "mobile page is blocked");
                    return None;
                }
                Some(page)
            }
            Err(err) => {
                info!(mobile_url = %mobile_url, error = %err, "mobile fetch failed, keeping current page");
                Some(current)
            }
        }
    }
}
