// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - SSRF (Server Side Request Forgery) Scanner
 * Points URL-valued parameters at the cloud metadata service and checks
 * whether the endpoint fetched it server-side.
 *
 * @copyright 2025 Bountyy Oy
 * @license Proprietary
 */

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::http_client::{HttpClient, ProbeOutcome};
use crate::scanners::ApiScanner;
use crate::types::Detection;

/// Parameters commonly used to pass a URL for the server to fetch.
const SSRF_PARAMS: &[&str] = &["url", "uri", "dest", "callback"];

const METADATA_TARGET: &str = "http://169.254.169.254/latest/meta-data/";

/// Body fragments indicating the metadata service answered.
const METADATA_MARKERS: &[&str] = &["ami-id", "instance-id", "iam/", "meta-data"];

const REMEDIATION: &str = "Validate and allowlist URLs before fetching them server-side. \
    Block requests to link-local, loopback and internal address ranges.";

pub struct SsrfScanner {
    http_client: Arc<HttpClient>,
}

impl SsrfScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl ApiScanner for SsrfScanner {
    fn name(&self) -> &'static str {
        "API7: Server Side Request Forgery (SSRF)"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        debug!("[SSRF] Probing {} url-valued parameter(s) on {}", SSRF_PARAMS.len(), endpoint);

        let mut detections = Vec::new();

        // One finding per run, naming the first parameter that leaked
        // metadata content back into the response.
        for &param in SSRF_PARAMS {
            let outcome = self
                .http_client
                .get_with_params(endpoint, &[(param, METADATA_TARGET)])
                .await;

            if let ProbeOutcome::Completed { status, body } = &outcome {
                let leaked = (200..300).contains(status)
                    && METADATA_MARKERS.iter().any(|marker| body.contains(marker));
                if leaked {
                    detections.push(Detection {
                        details: format!(
                            "Endpoint {} fetched the cloud metadata service via the '{}' parameter.",
                            endpoint, param
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
