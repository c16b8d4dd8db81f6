//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rs_blogscrape::{Error, HttpResponse, RequestOpts, Result, Transport};

#[derive(Debug, Clone)]
enum Route {
    Respond(HttpResponse),
    Fail,
}

/// One request seen by [`FakeTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub url: String,
    pub referer: Option<String>,
}

/// Answers from a fixed URL → response table and records every request.
///
/// Unknown URLs fail like a connection error. Clones share the table and
/// the request log.
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    routes: HashMap<String, Route>,
    log: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 200 response, no redirect.
    pub fn page(self, url: &str, body: &str) -> Self {
        self.redirect(url, url, body)
    }

    /// 200 response whose final URL differs from the requested one.
    pub fn redirect(mut self, url: &str, final_url: &str, body: &str) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Respond(HttpResponse {
                status: 200,
                final_url: final_url.to_string(),
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(
            url.to_string(),
            Route::Respond(HttpResponse {
                status,
                final_url: url.to_string(),
                body: String::new(),
            }),
        );
        self
    }

    pub fn fail(mut self, url: &str) -> Self {
        self.routes.insert(url.to_string(), Route::Fail);
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    /// Referer sent with the first request to `url`.
    pub fn referer_for(&self, url: &str) -> Option<String> {
        self.requests()
            .into_iter()
            .find(|r| r.url == url)
            .and_then(|r| r.referer)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str, opts: RequestOpts<'_>) -> Result<HttpResponse> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Recorded {
                url: url.to_string(),
                referer: opts.referer.map(str::to_string),
            });

        match self.routes.get(url) {
            Some(Route::Respond(response)) => Ok(response.clone()),
            Some(Route::Fail) | None => Err(Error::Http {
                url: url.to_string(),
                message: "connection refused".to_string(),
                timeout: false,
            }),
        }
    }
}

/// A post page with an editor main container around `inner`.
pub fn editor_post(inner: &str) -> String {
    format!(r#"<html><body><div class="se-main-container">{inner}</div></body></html>"#)
}

/// Search results item with a headline title.
pub fn result_item(class: &str, href: &str, title: &str) -> String {
    format!(
        r#"<li class="{class}"><a href="{href}"><span class="sds-comps-text sds-comps-text-type-headline1">{title}</span></a></li>"#
    )
}
