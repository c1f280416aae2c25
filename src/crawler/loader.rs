//! Page loading
//!
//! This module handles:
//! - The `PageLoader` seam the walker navigates through
//! - A bounded settle primitive (`poll_until`) that replaces fixed sleeps
//! - The HTTP implementation built on reqwest

use crate::config::{Config, LoaderConfig};
use crate::crawler::classifier;
use crate::crawler::SelectorSet;
use crate::{Result, WalkerError};
use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// A loaded page: the URL it was requested as and its markup
#[derive(Debug, Clone)]
pub struct Page {
    url: String,
    html: String,
}

impl Page {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    /// Parses the markup
    ///
    /// The returned document is not `Send`; keep it out of scope across
    /// `.await` points.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }

    /// Returns true if the page shows any content the walker can act on
    pub fn is_ready(&self, selectors: &SelectorSet) -> bool {
        classifier::is_ready(&self.document(), selectors)
    }
}

/// Navigates to a URL and returns the page once its content has settled
///
/// Implementations own whatever session state navigation needs. The walker
/// calls `load` strictly sequentially and never holds two pages at once.
#[async_trait]
pub trait PageLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<Page>;
}

/// Bounded waits applied around each navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    /// Fixed pause before the first probe
    pub delay: Duration,
    /// Ceiling on the whole polling phase
    pub timeout: Duration,
    /// Pause between probes
    pub interval: Duration,
}

impl SettlePolicy {
    pub fn from_config(config: &LoaderConfig) -> Self {
        Self {
            delay: Duration::from_millis(config.settle_delay),
            timeout: Duration::from_millis(config.settle_timeout),
            interval: Duration::from_millis(config.poll_interval),
        }
    }

    /// No delay, a single probe
    pub fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            timeout: Duration::ZERO,
            interval: Duration::ZERO,
        }
    }
}

/// Probes until `ready` holds or the policy's timeout elapses
///
/// The probe runs at least once. When the ceiling is reached the last probe
/// result is returned as-is: a slow page yields an under-populated snapshot
/// rather than an error. Probe errors are returned immediately.
pub async fn poll_until<T, F, Fut, P>(policy: &SettlePolicy, mut probe: F, ready: P) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    let deadline = Instant::now() + policy.timeout;
    let mut attempts = 0u32;

    loop {
        let value = probe().await?;
        attempts += 1;

        if ready(&value) {
            return Ok(value);
        }

        let now = Instant::now();
        if now >= deadline {
            tracing::debug!("Settle ceiling reached after {} probes", attempts);
            return Ok(value);
        }

        sleep(policy.interval.min(deadline - now)).await;
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use catalog_walker::config::Config;
/// use catalog_walker::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.loader.request_timeout))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Loads pages over plain HTTP
///
/// Content rendered by client-side scripts never appears in a plain fetch;
/// the settle loop re-fetches until catalog markup shows up or the ceiling
/// is reached, which covers server-side rendered listings and slow edges.
///
/// A page that is genuinely empty is downloaded once per poll interval until
/// the ceiling: at most `settle-timeout / poll-interval + 1` requests, four
/// with the built-in timings. Lower `settle-timeout` to trade settle
/// tolerance for fewer requests on dead ends.
pub struct HttpPageLoader {
    client: Client,
    policy: SettlePolicy,
    selectors: Arc<SelectorSet>,
}

impl HttpPageLoader {
    pub fn new(config: &Config, selectors: Arc<SelectorSet>) -> Result<Self> {
        Ok(Self::with_client(
            build_http_client(config)?,
            SettlePolicy::from_config(&config.loader),
            selectors,
        ))
    }

    pub fn with_client(client: Client, policy: SettlePolicy, selectors: Arc<SelectorSet>) -> Self {
        Self {
            client,
            policy,
            selectors,
        }
    }

    async fn fetch(&self, url: &str) -> Result<Page> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| WalkerError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalkerError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|source| WalkerError::Http {
            url: url.to_string(),
            source,
        })?;

        Ok(Page::new(url, html))
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    async fn load(&self, url: &str) -> Result<Page> {
        tracing::debug!("Loading {}", url);

        if !self.policy.delay.is_zero() {
            sleep(self.policy.delay).await;
        }

        let selectors = &self.selectors;
        poll_until(&self.policy, || self.fetch(url), |page| page.is_ready(selectors)).await
    }
}
