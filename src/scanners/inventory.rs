// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

// Improper Inventory Management scanner. Derives older API version paths
// from the endpoint URL and reports any that still answer. Retired
// versions left running are unmanaged attack surface.

use anyhow::Result;
use futures::future::join_all;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::http_client::{HttpClient, ProbeOutcome};
use crate::scanners::ApiScanner;
use crate::types::Detection;

const REMEDIATION: &str = "Retire and remove outdated API versions from production. \
    Keep an inventory of exposed API hosts and versions, and decommission what is unused.";

pub struct InventoryScanner {
    http_client: Arc<HttpClient>,
}

impl InventoryScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Build URLs for versions older than the one in the endpoint path.
    /// An endpoint without a `v<N>` path segment (or already at v1) yields
    /// no candidates.
    fn older_version_urls(endpoint: &str) -> Vec<(u32, String)> {
        let Ok(parsed) = Url::parse(endpoint) else {
            return Vec::new();
        };

        let segments: Vec<String> = match parsed.path_segments() {
            Some(segments) => segments.map(str::to_string).collect(),
            None => return Vec::new(),
        };

        let Some((index, current)) = segments
            .iter()
            .enumerate()
            .find_map(|(i, segment)| parse_version_segment(segment).map(|v| (i, v)))
        else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        for version in 1..current {
            let mut swapped = parsed.clone();
            let mut new_segments = segments.clone();
            new_segments[index] = format!("v{}", version);
            swapped.set_path(&new_segments.join("/"));
            candidates.push((version, swapped.to_string()));
        }
        candidates
    }
}

/// Parse a path segment of the form `v<digits>`.
fn parse_version_segment(segment: &str) -> Option<u32> {
    let digits = segment.strip_prefix('v')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[async_trait::async_trait]
impl ApiScanner for InventoryScanner {
    fn name(&self) -> &'static str {
        "API9: Improper Inventory Management"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        let candidates = Self::older_version_urls(endpoint);
        if candidates.is_empty() {
            debug!("[Inventory] No version segment in {}, skipping", endpoint);
            return Ok(Vec::new());
        }

        let probes = candidates.iter().map(|(_, url)| self.http_client.get(url));
        let outcomes = join_all(probes).await;

        let mut detections = Vec::new();
        for ((version, url), outcome) in candidates.iter().zip(&outcomes) {
            if let ProbeOutcome::Completed { status, .. } = outcome {
                if (200..300).contains(status) {
                    detections.push(Detection {
                        details: format!(
                            "Retired API version v{} is still serving requests at {} (status {}).",
                            version, url, status
                        ),
                        remediation: REMEDIATION.to_string(),
                    });
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
    fn derives_all_older_versions() {
        let candidates =
            InventoryScanner::older_version_urls("http://api.example.com/v3/users?id=1");
        let urls: Vec<&str> = candidates.iter().map(|(_, url)| url.as_str()).collect();

        assert_eq!(
            urls,
            vec![
                "http://api.example.com/v1/users?id=1",
                "http://api.example.com/v2/users?id=1"
            ]
        );
    }

    #[test]
    fn unversioned_endpoints_yield_no_candidates() {
        assert!(InventoryScanner::older_version_urls("http://api.example.com/users").is_empty());
    }

    #[test]
    fn v1_endpoints_yield_no_candidates() {
        assert!(InventoryScanner::older_version_urls("http://api.example.com/v1/users").is_empty());
    }

    #[test]
    fn version_segments_require_digits_only() {
        assert_eq!(parse_version_segment("v2"), Some(2));
        assert_eq!(parse_version_segment("v"), None);
        assert_eq!(parse_version_segment("version2"), None);
        assert_eq!(parse_version_segment("v2beta"), None);
    }
}
