// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

// Broken Function Level Authorization scanner. Probes administrative
// sibling paths of the endpoint; any of them answering 2xx to an
// unauthenticated request is reported.

use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;

use crate::http_client::{HttpClient, ProbeOutcome};
use crate::scanners::ApiScanner;
use crate::types::Detection;

/// Path suffixes that should require elevated privileges.
const PRIVILEGED_SUFFIXES: &[&str] = &["admin", "debug", "internal"];

const REMEDIATION: &str = "Enforce function-level authorization on every administrative route. \
    Deny by default and require an explicit role check for privileged functions.";

pub struct FunctionAuthScanner {
    http_client: Arc<HttpClient>,
}

impl FunctionAuthScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl ApiScanner for FunctionAuthScanner {
    fn name(&self) -> &'static str {
        "API5: Broken Function Level Authorization"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        let base = endpoint.trim_end_matches('/');
        let candidates: Vec<String> = PRIVILEGED_SUFFIXES
            .iter()
            .map(|suffix| format!("{}/{}", base, suffix))
            .collect();

        debug!(
            "[FunctionAuth] Probing {} privileged sibling path(s) of {}",
            candidates.len(),
            endpoint
        );

        let probes = candidates.iter().map(|url| self.http_client.get(url));
        let outcomes = join_all(probes).await;

        let mut detections = Vec::new();
        for (candidate, outcome) in candidates.iter().zip(&outcomes) {
            if let ProbeOutcome::Completed { status, .. } = outcome {
                if (200..300).contains(status) {
                    detections.push(Detection {
                        details: format!(
                            "Privileged function {} is reachable without authorization (status {}).",
                            candidate, status
                        ),
                        remediation: REMEDIATION.to_string(),
                    });
                }
            }
        }

        Ok(detections)
    }
}
