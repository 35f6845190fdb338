// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::errors::ScannerError;

/// Scanner runtime configuration.
///
/// Defaults match the reference deployment: five concurrent scan units and
/// a ten second probe timeout. Environment variables override the defaults,
/// CLI flags override the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    #[serde(default = "default_concurrency")]
    pub max_concurrency: usize,

    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub user_agent: Option<String>,

    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

fn default_concurrency() -> usize {
    5
}

fn default_timeout() -> u64 {
    10
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_concurrency(),
            request_timeout_secs: default_timeout(),
            user_agent: None,
            reports_dir: default_reports_dir(),
        }
    }
}

impl ScannerConfig {
    /// Build a configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("LUOTAIN_CONCURRENCY") {
            if let Ok(parsed) = value.parse() {
                config.max_concurrency = parsed;
            }
        }

        if let Ok(value) = std::env::var("LUOTAIN_TIMEOUT_SECS") {
            if let Ok(parsed) = value.parse() {
                config.request_timeout_secs = parsed;
            }
        }

        if let Ok(value) = std::env::var("LUOTAIN_USER_AGENT") {
            if !value.is_empty() {
                config.user_agent = Some(value);
            }
        }

        if let Ok(value) = std::env::var("LUOTAIN_REPORTS_DIR") {
            if !value.is_empty() {
                config.reports_dir = PathBuf::from(value);
            }
        }

        config
    }

    pub fn validate(&self) -> Result<(), ScannerError> {
        if self.max_concurrency == 0 {
            return Err(ScannerError::Configuration(
                "concurrency must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ScannerError::Configuration(
                "request timeout must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}
