//! Page fetching.
//!
//! The `PageFetcher` trait is the seam between extraction and the network:
//!
//! - `HttpFetcher` - reqwest with browser-like headers
//! - `ValidatedFetcher` - SSRF guard around any fetcher
//! - `MockFetcher` - canned HTML for tests
//!
//! # Example
//!
//! ```rust,ignore
//! use extraction::fetch::{PageFetcher, ValidatedFetcher};
//! use extraction::UrlValidator;
//!
//! let fetcher = ValidatedFetcher::http(UrlValidator::new(), None)?;
//! let page = fetcher.fetch("https://www.musinsa.com/app/goods/1234567").await?;
//! ```

mod http;
mod mock;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{FetchError, FetchResult};
use crate::security::UrlValidator;
use crate::types::FetchedPage;

pub use http::{HttpFetcher, BROWSER_USER_AGENT, MAX_REDIRECTS};
pub use mock::MockFetcher;

/// Fetches raw HTML for a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a single page.
    ///
    /// Non-2xx responses must be reported as `FetchError::Status`.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;

    /// Get the fetcher name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// A fetcher that validates URLs before fetching (SSRF protection).
///
/// For network fetches use [`ValidatedFetcher::http`], which applies the
/// same rules to every redirect hop before it is requested:
///
/// ```rust,ignore
/// let fetcher = ValidatedFetcher::http(UrlValidator::new(), None)?;
/// ```
pub struct ValidatedFetcher<F: PageFetcher> {
    inner: F,
    validator: UrlValidator,
}

impl<F: PageFetcher> ValidatedFetcher<F> {
    /// Create a new validated fetcher with default security rules.
    pub fn new(fetcher: F) -> Self {
        Self {
            inner: fetcher,
            validator: UrlValidator::new(),
        }
    }

    /// Create with a custom validator.
    pub fn with_validator(fetcher: F, validator: UrlValidator) -> Self {
        Self {
            inner: fetcher,
            validator,
        }
    }
}

impl ValidatedFetcher<HttpFetcher> {
    /// An [`HttpFetcher`] whose redirects are checked by `validator`,
    /// wrapped so the submitted URL is checked (with DNS) as well.
    pub fn http(validator: UrlValidator, timeout: Option<Duration>) -> FetchResult<Self> {
        let inner = HttpFetcher::with_redirect_validator(validator.clone(), timeout)?;
        Ok(Self::with_validator(inner, validator))
    }
}

#[async_trait]
impl<F: PageFetcher> PageFetcher for ValidatedFetcher<F> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.validator.validate_with_dns(url).await?;

        let page = self.inner.fetch(url).await?;

        // Redirects may have landed somewhere internal
        if page.url != url {
            self.validator.validate(&page.url).map_err(|e| {
                tracing::warn!(
                    url = %url,
                    final_url = %page.url,
                    error = %e,
                    "Redirect target blocked"
                );
                FetchError::Security(e)
            })?;
        }

        Ok(page)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
