//! `reqwest`-backed transport with a cookie jar and browser-like headers.

use std::time::Duration;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, DNT, REFERER,
    UPGRADE_INSECURE_REQUESTS,
};
use reqwest::Client;
use tracing::debug;

use super::{HttpResponse, RequestOpts, Transport};
use crate::encoding::decode_body;
use crate::error::{Error, Result};
use crate::options::Options;

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// One crawl's HTTP session.
///
/// Cookies persist across calls; the user agent is chosen once at
/// construction. Not meant to be shared between concurrent crawl units.
pub struct HttpSession {
    client: Client,
    user_agent: String,
}

impl HttpSession {
    /// Build a session from `options`.
    pub fn new(options: &Options) -> Result<Self> {
        let user_agent = options
            .user_agents
            .choose(&mut rand::thread_rng())
            .cloned()
            .ok_or_else(|| Error::Config("user_agents must contain at least one entry".into()))?;

        let client = Client::builder()
            .cookie_store(true)
            .user_agent(user_agent.clone())
            .default_headers(default_headers(options)?)
            .connect_timeout(Duration::from_secs(5))
            .timeout(options.timeout())
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {e}")))?;

        debug!(user_agent = %user_agent, "http session created");
        Ok(Self { client, user_agent })
    }

    /// User agent sent by every request of this session.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

fn default_headers(options: &Options) -> Result<HeaderMap> {
    let accept_language = HeaderValue::from_str(&options.accept_language)
        .map_err(|e| Error::Config(format!("invalid accept_language: {e}")))?;

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    headers.insert(ACCEPT_LANGUAGE, accept_language);
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    for (name, value) in [
        ("sec-fetch-dest", "document"),
        ("sec-fetch-mode", "navigate"),
        ("sec-fetch-site", "none"),
        ("sec-fetch-user", "?1"),
    ] {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }
    Ok(headers)
}

fn transport_error(url: &str, err: &reqwest::Error) -> Error {
    Error::Http {
        url: url.to_string(),
        message: err.to_string(),
        timeout: err.is_timeout(),
    }
}

#[async_trait]
impl Transport for HttpSession {
    async fn get(&self, url: &str, opts: RequestOpts<'_>) -> Result<HttpResponse> {
        let mut request = self.client.get(url);
        if let Some(referer) = opts.referer {
            request = request.header(REFERER, referer);
        }
        if let Some(timeout) = opts.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| transport_error(url, &e))?;
        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response.bytes().await.map_err(|e| transport_error(url, &e))?;
        let body = decode_body(&bytes, content_type.as_deref());

        debug!(url, status, final_url = %final_url, bytes = bytes.len(), "GET");
        Ok(HttpResponse {
            status,
            final_url,
            body,
        })
    }
}
