// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};

use crate::types::ScanResults;

pub struct JsonReportGenerator;

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Direct serialization of the findings collection. An empty run
    /// serializes to `[]`.
    pub fn generate(&self, results: &ScanResults) -> Result<String> {
        serde_json::to_string_pretty(&results.findings).context("Failed to serialize findings")
    }
}

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}
