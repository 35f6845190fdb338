// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};

/// A single reported vulnerability observation with remediation advice.
///
/// Immutable once created. Synthetic error findings produced when a scan
/// unit fails are distinguishable only by their details text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub vulnerability: String,
    pub endpoint: String,
    pub details: String,
    pub remediation: String,
}

impl Finding {
    /// Synthetic finding recorded when a scan unit fails. The failure stays
    /// visible in the report instead of aborting sibling units.
    pub fn scan_error(vulnerability: &str, endpoint: &str, cause: &str) -> Self {
        Self {
            vulnerability: vulnerability.to_string(),
            endpoint: endpoint.to_string(),
            details: format!("Error during scan: {}", cause),
            remediation: "N/A".to_string(),
        }
    }
}

/// Raw observation emitted by a scanner, before the engine tags it with the
/// scanner label and target endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub details: String,
    pub remediation: String,
}

/// Summary of one completed scan run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResults {
    pub endpoints_scanned: usize,
    pub units_executed: usize,
    pub findings: Vec<Finding>,
    pub started_at: String,
    pub completed_at: String,
    pub duration_seconds: f64,
}
