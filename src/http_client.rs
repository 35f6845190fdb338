// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Probe HTTP Client
 * Executes single HTTP exchanges with a hard timeout and normalizes every
 * outcome, so scanners never carry transport error handling of their own.
 *
 * @copyright 2025 Bountyy Oy
 * @license Proprietary
 */

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Realistic browser User-Agents to avoid detection
const BROWSER_USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Chrome on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Get a realistic browser User-Agent (rotates to avoid blocks)
fn get_browser_user_agent() -> &'static str {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let index = COUNTER.fetch_add(1, Ordering::Relaxed) % BROWSER_USER_AGENTS.len();
    BROWSER_USER_AGENTS[index]
}

/// Maximum response body size (10MB) to prevent memory exhaustion
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Outcome of one HTTP probe.
///
/// Any response the server sends is `Completed`, whatever the status code,
/// 4xx and 5xx included. `Failed` covers transport-level errors only:
/// connect failures, timeouts, DNS, TLS. The probe client never returns an
/// `Err`, so this sum type is the whole interface scanners see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Completed { status: u16, body: String },
    Failed { cause: String },
}

impl ProbeOutcome {
    pub fn status(&self) -> Option<u16> {
        match self {
            ProbeOutcome::Completed { status, .. } => Some(*status),
            ProbeOutcome::Failed { .. } => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Completed { body, .. } => Some(body),
            ProbeOutcome::Failed { .. } => None,
        }
    }

    /// True for a completed exchange with a 2xx status.
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Completed { status, .. } if (200..300).contains(status))
    }
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    max_body_size: usize,
}

impl HttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self> {
        Self::with_config(timeout_secs, None)
    }

    pub fn with_config(timeout_secs: u64, user_agent: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(match user_agent {
                Some(ua) => ua,
                None => get_browser_user_agent(),
            })
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            max_body_size: MAX_BODY_SIZE,
        })
    }

    /// Send a plain GET probe.
    pub async fn get(&self, url: &str) -> ProbeOutcome {
        self.execute(self.client.get(url), url).await
    }

    /// Send a GET probe with query parameters.
    pub async fn get_with_params(&self, url: &str, params: &[(&str, &str)]) -> ProbeOutcome {
        self.execute(self.client.get(url).query(params), url).await
    }

    /// Send a GET probe with custom headers.
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: Vec<(String, String)>,
    ) -> ProbeOutcome {
        let mut request = self.client.get(url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        self.execute(request, url).await
    }

    async fn execute(&self, request: reqwest::RequestBuilder, url: &str) -> ProbeOutcome {
        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();

                // Read body with size limit
                let body_bytes = response.bytes().await.unwrap_or_default();
                let body = if body_bytes.len() > self.max_body_size {
                    String::from_utf8_lossy(&body_bytes[..self.max_body_size]).to_string()
                } else {
                    String::from_utf8_lossy(&body_bytes).to_string()
                };

                debug!("[Probe] GET {} -> {} ({} bytes)", url, status, body.len());
                ProbeOutcome::Completed { status, body }
            }
            Err(e) => {
                let cause = classify_failure(&e);
                debug!("[Probe] GET {} failed: {}", url, cause);
                ProbeOutcome::Failed { cause }
            }
        }
    }
}

/// Coarse transport failure classification. Scanners only ever log the
/// cause, so the exact wording is informational.
fn classify_failure(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        format!("timeout: {}", error)
    } else if error.is_connect() {
        format!("connect error: {}", error)
    } else if error.is_redirect() {
        format!("redirect error: {}", error)
    } else {
        error.to_string()
    }
}
