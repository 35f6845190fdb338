// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

// Unsafe Consumption of APIs scanner. Hands the endpoint a third-party URL
// and checks whether it is echoed back unvalidated, a proxy for trusting
// upstream API data blindly.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::http_client::{HttpClient, ProbeOutcome};
use crate::scanners::ApiScanner;
use crate::types::Detection;

/// Parameter used to feed the endpoint an upstream source.
const UPSTREAM_PARAM: &str = "feed";

/// Reserved .invalid TLD: never resolves, so a reflection can only come
/// from the endpoint echoing our input, not from a real fetch.
const UPSTREAM_URL: &str = "https://third-party.invalid/luotain-probe";

const REMEDIATION: &str = "Treat data from integrated third-party APIs as untrusted input. \
    Validate and sanitize upstream responses before storing or returning them.";

pub struct UnsafeConsumptionScanner {
    http_client: Arc<HttpClient>,
}

impl UnsafeConsumptionScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl ApiScanner for UnsafeConsumptionScanner {
    fn name(&self) -> &'static str {
        "API10: Unsafe Consumption of APIs"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        let outcome = self
            .http_client
            .get_with_params(endpoint, &[(UPSTREAM_PARAM, UPSTREAM_URL)])
            .await;

        let mut detections = Vec::new();

        if let ProbeOutcome::Completed { status, body } = &outcome {
            if (200..300).contains(status) && body.contains(UPSTREAM_URL) {
                debug!("[UnsafeConsumption] {} reflected the upstream URL", endpoint);
                detections.push(Detection {
                    details: format!(
                        "Endpoint {} accepted and echoed an unvalidated third-party source URL via the '{}' parameter.",
                        endpoint, UPSTREAM_PARAM
                    ),
                    remediation: REMEDIATION.to_string(),
                });
            }
        }

        Ok(detections)
    }
}
