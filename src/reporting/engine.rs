// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::reporting::formats::html::HtmlReportGenerator;
use crate::reporting::formats::json::JsonReportGenerator;
use crate::types::ScanResults;

/// Paths of the artifacts written for one scan run.
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub html: PathBuf,
}

pub struct ReportEngine;

impl ReportEngine {
    pub fn new() -> Self {
        Self
    }

    /// Write the JSON and HTML artifacts for a finished run. Filenames are
    /// timestamp-suffixed so repeated runs never clobber earlier reports.
    pub fn generate_reports(&self, results: &ScanResults, reports_dir: &Path) -> Result<ReportPaths> {
        fs::create_dir_all(reports_dir).with_context(|| {
            format!("Failed to create reports directory {}", reports_dir.display())
        })?;

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let json_path = reports_dir.join(format!("api_scan_report_{}.json", timestamp));
        let html_path = reports_dir.join(format!("api_scan_report_{}.html", timestamp));

        let json = JsonReportGenerator::new().generate(results)?;
        fs::write(&json_path, json)
            .with_context(|| format!("Failed to write {}", json_path.display()))?;

        let html = HtmlReportGenerator::new().generate(results);
        fs::write(&html_path, html)
            .with_context(|| format!("Failed to write {}", html_path.display()))?;

        info!(
            "[Report] Wrote {} and {}",
            json_path.display(),
            html_path.display()
        );

        Ok(ReportPaths {
            json: json_path,
            html: html_path,
        })
    }
}

impl Default for ReportEngine {
    fn default() -> Self {
        Self::new()
    }
}
