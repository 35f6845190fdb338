// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Broken Authentication Scanner
 * Tests whether an endpoint is reachable without valid credentials.
 *
 * @copyright 2025 Bountyy Oy
 * @license Proprietary
 */

use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

use crate::http_client::{HttpClient, ProbeOutcome};
use crate::scanners::ApiScanner;
use crate::types::Detection;

const REMEDIATION: &str = "Implement strong authentication mechanisms such as OAuth2 or JWT. \
    Enforce multi-factor authentication and session management.";

/// Probe header sets: an anonymous request, then a syntactically well-formed
/// but forged bearer token.
fn auth_probe_headers() -> [Vec<(String, String)>; 2] {
    [
        Vec::new(),
        vec![("Authorization".to_string(), "Bearer invalidtoken".to_string())],
    ]
}

pub struct BrokenAuthScanner {
    http_client: Arc<HttpClient>,
}

impl BrokenAuthScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl ApiScanner for BrokenAuthScanner {
    fn name(&self) -> &'static str {
        "API2: Broken Authentication"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        debug!("[BrokenAuth] Probing {} without valid credentials", endpoint);

        let probes = auth_probe_headers()
            .into_iter()
            .map(|headers| self.http_client.get_with_headers(endpoint, headers));
        let outcomes = join_all(probes).await;

        let mut detections = Vec::new();

        // A 2xx on either probe means the endpoint accepted an
        // unauthenticated or invalidly authenticated request. One finding
        // per run: stop at the first positive probe.
        for outcome in &outcomes {
            if let ProbeOutcome::Completed { status, .. } = outcome {
                if (200..300).contains(status) {
                    detections.push(Detection {
                        details: format!(
                            "Endpoint {} allows access without proper authentication.",
                            endpoint
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
