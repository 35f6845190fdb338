// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

// Security Misconfiguration scanner. Looks for verbose error output and
// debug-mode artifacts in response bodies, with and without a debug query
// parameter nudge.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::http_client::{HttpClient, ProbeOutcome};
use crate::scanners::ApiScanner;
use crate::types::Detection;

/// Body fragments that betray debug mode or unhandled error output.
const ERROR_MARKERS: &[&str] = &[
    "Traceback (most recent call last)",
    "at java.lang.",
    "NullPointerException",
    "Fatal error:",
    "DEBUG = True",
    "stack trace:",
    "ORA-00933",
    "syntax error at or near",
];

const REMEDIATION: &str = "Disable debug mode and verbose error pages in production. \
    Return generic error messages and log details server-side only.";

pub struct MisconfigurationScanner {
    http_client: Arc<HttpClient>,
}

impl MisconfigurationScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    fn matched_marker(body: &str) -> Option<&'static str> {
        ERROR_MARKERS.iter().copied().find(|marker| body.contains(marker))
    }
}

#[async_trait::async_trait]
impl ApiScanner for MisconfigurationScanner {
    fn name(&self) -> &'static str {
        "API8: Security Misconfiguration"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        let plain = self.http_client.get(endpoint).await;
        let nudged = self
            .http_client
            .get_with_params(endpoint, &[("debug", "true")])
            .await;

        let mut detections = Vec::new();

        // Any completed exchange counts here, error statuses included:
        // a 500 page carrying a stack trace is exactly the signal.
        for (probe, outcome) in [("plain request", &plain), ("debug=true request", &nudged)] {
            if let ProbeOutcome::Completed { body, .. } = outcome {
                if let Some(marker) = Self::matched_marker(body) {
                    debug!("[Misconfiguration] {} leaked '{}' on {}", endpoint, marker, probe);
                    detections.push(Detection {
                        details: format!(
                            "Endpoint {} returned verbose error output ('{}') on a {}.",
                            endpoint, marker, probe
                        ),
                        remediation: REMEDIATION.to_string(),
                    });
                    break;
                }
            }
        }

        Ok(detections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_matching_finds_stack_traces() {
        let body = "<html>Traceback (most recent call last):\n  File ...</html>";
        assert_eq!(
            MisconfigurationScanner::matched_marker(body),
            Some("Traceback (most recent call last)")
        );
    }

    #[test]
    fn clean_bodies_match_nothing() {
        assert_eq!(MisconfigurationScanner::matched_marker("{\"ok\":true}"), None);
    }
}
