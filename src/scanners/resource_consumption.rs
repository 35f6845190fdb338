// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

// Unrestricted Resource Consumption scanner. Compares a baseline response
// against one requesting an absurd page size; an endpoint that honors the
// oversized limit has no server-side cap.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::http_client::{HttpClient, ProbeOutcome};
use crate::scanners::ApiScanner;
use crate::types::Detection;

const OVERSIZED_LIMIT: &str = "1000000";

/// Flooded responses smaller than this are never reported, whatever the
/// ratio to baseline.
const MIN_FLOODED_BODY_BYTES: usize = 4096;

const REMEDIATION: &str = "Enforce server-side pagination caps and reject or clamp oversized \
    limit parameters. Apply rate limiting and execution timeouts to expensive queries.";

pub struct ResourceConsumptionScanner {
    http_client: Arc<HttpClient>,
}

impl ResourceConsumptionScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl ApiScanner for ResourceConsumptionScanner {
    fn name(&self) -> &'static str {
        "API4: Unrestricted Resource Consumption"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        let baseline = self.http_client.get(endpoint).await;
        let flooded = self
            .http_client
            .get_with_params(
                endpoint,
                &[("limit", OVERSIZED_LIMIT), ("per_page", OVERSIZED_LIMIT)],
            )
            .await;

        let mut detections = Vec::new();

        if let (
            ProbeOutcome::Completed {
                status: baseline_status,
                body: baseline_body,
            },
            ProbeOutcome::Completed {
                status: flooded_status,
                body: flooded_body,
            },
        ) = (&baseline, &flooded)
        {
            let both_ok =
                (200..300).contains(baseline_status) && (200..300).contains(flooded_status);
            let blew_up = flooded_body.len() >= MIN_FLOODED_BODY_BYTES
                && flooded_body.len() > baseline_body.len().saturating_mul(10);

            debug!(
                "[ResourceConsumption] {} baseline={}B flooded={}B",
                endpoint,
                baseline_body.len(),
                flooded_body.len()
            );

            if both_ok && blew_up {
                detections.push(Detection {
                    details: format!(
                        "Endpoint {} honors an unbounded limit parameter (limit={}), returning {} bytes against a {} byte baseline.",
                        endpoint,
                        OVERSIZED_LIMIT,
                        flooded_body.len(),
                        baseline_body.len()
                    ),
                    remediation: REMEDIATION.to_string(),
                });
            }
        }

        Ok(detections)
    }
}
