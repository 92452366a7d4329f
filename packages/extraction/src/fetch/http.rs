//! HTTP page fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use tracing::{debug, warn};

use super::PageFetcher;
use crate::error::{FetchError, FetchResult, SecurityError};
use crate::security::UrlValidator;
use crate::types::FetchedPage;

/// Browser-like User-Agent; several shops refuse obvious bots.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 5;

/// Fetches pages with reqwest.
///
/// There is no request timeout unless one is set with [`HttpFetcher::with_timeout`];
/// the network layer defaults apply otherwise.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with browser headers and no request timeout.
    pub fn new() -> FetchResult<Self> {
        Self::build(None, None)
    }

    /// Create a fetcher that aborts requests after `timeout`.
    pub fn with_timeout(timeout: Duration) -> FetchResult<Self> {
        Self::build(Some(timeout), None)
    }

    /// Create a fetcher that checks every redirect hop against `validator`
    /// before requesting it.
    pub fn with_redirect_validator(
        validator: UrlValidator,
        timeout: Option<Duration>,
    ) -> FetchResult<Self> {
        Self::build(timeout, Some(validator))
    }

    fn build(timeout: Option<Duration>, validator: Option<UrlValidator>) -> FetchResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
        );

        let redirects = match validator {
            Some(validator) => Policy::custom(move |attempt| {
                if attempt.previous().len() >= MAX_REDIRECTS {
                    return attempt.error("too many redirects");
                }
                match validator.validate(attempt.url().as_str()) {
                    Ok(()) => attempt.follow(),
                    Err(e) => {
                        let target = format!("{} ({})", attempt.url(), e);
                        attempt.error(SecurityError::BlockedRedirect(target))
                    }
                }
            }),
            None => Policy::limited(MAX_REDIRECTS),
        };

        let mut builder = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .redirect(redirects);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| FetchError::Http(Box::new(e)))?;
        Ok(Self { client })
    }
}

/// A request error caused by a rejected redirect becomes a security error.
fn request_error(err: reqwest::Error) -> FetchError {
    let mut source = std::error::Error::source(&err);
    while let Some(inner) = source {
        if let Some(SecurityError::BlockedRedirect(target)) = inner.downcast_ref::<SecurityError>()
        {
            return FetchError::Security(SecurityError::BlockedRedirect(target.clone()));
        }
        source = inner.source();
    }
    FetchError::Http(Box::new(err))
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        debug!(url = %url, "HTTP fetch starting");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            request_error(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Non-success response");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .map_err(|e| FetchError::Http(Box::new(e)))?;

        debug!(url = %url, final_url = %final_url, bytes = html.len(), "HTTP fetch complete");

        Ok(FetchedPage {
            url: final_url,
            html,
            status: status.as_u16(),
        })
    }

    fn name(&self) -> &str {
        "http"
    }
}
