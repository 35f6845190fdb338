// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

// Unrestricted Access to Sensitive Business Flows scanner. Replays a short
// burst of identical requests; an endpoint that accepts the entire burst
// applies no throttling to repeated flow execution.

use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

use crate::http_client::HttpClient;
use crate::scanners::ApiScanner;
use crate::types::Detection;

const BURST_PROBES: usize = 5;

const REMEDIATION: &str = "Throttle repeated executions of sensitive business flows per client. \
    Add device fingerprinting or human verification for abuse-prone operations.";

pub struct SensitiveFlowScanner {
    http_client: Arc<HttpClient>,
}

impl SensitiveFlowScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl ApiScanner for SensitiveFlowScanner {
    fn name(&self) -> &'static str {
        "API6: Unrestricted Access to Sensitive Business Flows"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        // Sequential on purpose: the burst measures whether repeated calls
        // keep being accepted, not how the server handles parallelism.
        for attempt in 1..=BURST_PROBES {
            let outcome = self.http_client.get(endpoint).await;
            if !outcome.is_success() {
                debug!(
                    "[SensitiveFlows] {} rejected burst attempt {}/{}, no finding",
                    endpoint, attempt, BURST_PROBES
                );
                return Ok(Vec::new());
            }
        }

        Ok(vec![Detection {
            details: format!(
                "Endpoint {} accepted {} rapid repeated requests without throttling.",
                endpoint, BURST_PROBES
            ),
            remediation: REMEDIATION.to_string(),
        }])
    }
}
