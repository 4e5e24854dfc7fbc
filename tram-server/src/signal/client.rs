//! Live line-summary HTTP client.
//!
//! Queries the provider's per-stop `linesummary` endpoint and extracts the
//! countdown for one line.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use tracing::trace;

use crate::catalog::{LineCode, StopCode};

use super::error::SignalError;
use super::parse::parse_wait_message;
use super::types::LineSummary;
use super::{Countdown, SignalSource};

/// Default base URL for the provider API.
const DEFAULT_BASE_URL: &str = "https://giromilano.atm.it/proxy.tpportal/api/tpPortal";

/// Site the provider expects requests to originate from.
const DEFAULT_ORIGIN: &str = "https://giromilano.atm.it";

/// The provider rejects non-browser user agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Configuration for the live client.
#[derive(Debug, Clone)]
pub struct SignalClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Value for the Origin and Referer headers
    pub origin: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for SignalClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl SignalClientConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Provider API client.
///
/// Every call goes straight to the network; bounding how many run at once is
/// left to the [`Poller`](crate::poll::Poller) so that time spent queued is
/// never charged against a request's timeout.
#[derive(Debug, Clone)]
pub struct LiveSignalClient {
    http: reqwest::Client,
    base_url: String,
}

impl LiveSignalClient {
    /// Create a client with the given configuration.
    pub fn new(config: SignalClientConfig) -> Result<Self, SignalError> {
        let origin = HeaderValue::from_str(&config.origin)
            .map_err(|_| SignalError::NotConfigured(format!("invalid origin: {}", config.origin)))?;
        let referer = HeaderValue::from_str(&format!("{}/", config.origin))
            .map_err(|_| SignalError::NotConfigured(format!("invalid origin: {}", config.origin)))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(ORIGIN, origin);
        headers.insert(REFERER, referer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn summary_url(&self, stop: &StopCode) -> String {
        format!("{}/tpl/stops/{}/linesummary", self.base_url, stop.as_str())
    }

    /// Get the full line summary for a stop.
    pub async fn get_line_summary(&self, stop: &StopCode) -> Result<LineSummary, SignalError> {
        let response = self.http.get(self.summary_url(stop)).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SignalError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SignalError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl SignalSource for LiveSignalClient {
    async fn fetch(&self, stop: &StopCode, line: &LineCode) -> Result<Countdown, SignalError> {
        let summary = self.get_line_summary(stop).await?;
        countdown_for_line(&summary, stop, line)
    }
}

/// Extract one line's countdown from a stop summary.
pub(super) fn countdown_for_line(
    summary: &LineSummary,
    stop: &StopCode,
    line: &LineCode,
) -> Result<Countdown, SignalError> {
    let entry = summary
        .line(line.as_str())
        .ok_or_else(|| SignalError::LineNotServed {
            stop: stop.clone(),
            line: line.clone(),
        })?;

    let countdown = parse_wait_message(entry.wait_message.as_deref());
    trace!(
        stop = %stop,
        line = %line,
        wait_message = ?entry.wait_message,
        ?countdown,
        "parsed wait message"
    );

    Ok(countdown)
}
