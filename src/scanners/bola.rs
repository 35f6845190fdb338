// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - BOLA (Broken Object Level Authorization) Scanner
 * Tests whether an endpoint serves other users' objects when the object id
 * query parameter is swapped.
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

const REMEDIATION: &str = "Implement strict object-level authorization checks on the server side. \
    Verify that the authenticated user has permission to access the requested object.";

pub struct BolaScanner {
    http_client: Arc<HttpClient>,
}

impl BolaScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl ApiScanner for BolaScanner {
    fn name(&self) -> &'static str {
        "API1: Broken Object Level Authorization (BOLA)"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        debug!("[BOLA] Probing {} with swapped object ids", endpoint);

        // Baseline id, a sibling id belonging to another user, and a
        // non-existent id. The last probe only checks how the endpoint
        // answers out-of-range ids; the heuristic reads the first two.
        let (baseline, sibling, _nonexistent) = tokio::join!(
            self.http_client.get_with_params(endpoint, &[("id", "1")]),
            self.http_client.get_with_params(endpoint, &[("id", "2")]),
            self.http_client.get_with_params(endpoint, &[("id", "9999")]),
        );

        let mut detections = Vec::new();

        // Both the baseline id and the sibling id resolving with different
        // bodies suggests the endpoint serves other users' objects without
        // an ownership check. A failed probe, a non-200 status or identical
        // bodies all mean no signal.
        if let (
            ProbeOutcome::Completed {
                status: baseline_status,
                body: baseline_body,
            },
            ProbeOutcome::Completed {
                status: sibling_status,
                body: sibling_body,
            },
        ) = (&baseline, &sibling)
        {
            if *baseline_status == 200 && *sibling_status == 200 && baseline_body != sibling_body {
                detections.push(Detection {
                    details: format!(
                        "Endpoint {} allows access to objects of other users (id=2).",
                        endpoint
                    ),
                    remediation: REMEDIATION.to_string(),
                });
            }
        }

        Ok(detections)
    }
}
