// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised before or after scanning.
///
/// Per-probe and per-scanner failures never surface here: the probe client
/// normalizes transport errors into `ProbeOutcome::Failed` and the scan
/// engine converts scanner errors into synthetic findings, so a run that
/// starts always completes and always produces a report.
#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to read endpoint file {}: {source}", path.display())]
    EndpointFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
