// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Object Property Level Authorization Scanner
 * Looks for sensitive object properties leaking through API responses.
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

/// Property names that should never appear in API responses.
const SENSITIVE_PROPERTIES: &[&str] = &[
    "password",
    "password_hash",
    "passwd",
    "ssn",
    "credit_card",
    "card_number",
    "secret",
    "api_key",
    "access_token",
    "private_key",
];

const REMEDIATION: &str = "Return only the object properties the client is authorized to see. \
    Define explicit response schemas instead of serializing internal objects directly.";

pub struct PropertyAuthScanner {
    http_client: Arc<HttpClient>,
}

impl PropertyAuthScanner {
    pub fn new(http_client: Arc<HttpClient>) -> Self {
        Self { http_client }
    }

    /// Collect sensitive key names appearing anywhere in a JSON value.
    fn collect_sensitive_keys(value: &serde_json::Value, exposed: &mut Vec<String>) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, nested) in map {
                    let key_lower = key.to_lowercase();
                    if SENSITIVE_PROPERTIES
                        .iter()
                        .any(|property| key_lower.contains(property))
                    {
                        exposed.push(key.clone());
                    }
                    Self::collect_sensitive_keys(nested, exposed);
                }
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    Self::collect_sensitive_keys(item, exposed);
                }
            }
            _ => {}
        }
    }
}

#[async_trait::async_trait]
impl ApiScanner for PropertyAuthScanner {
    fn name(&self) -> &'static str {
        "API3: Broken Object Property Level Authorization"
    }

    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>> {
        let outcome = self.http_client.get(endpoint).await;

        let ProbeOutcome::Completed { status, body } = outcome else {
            return Ok(Vec::new());
        };
        if !(200..300).contains(&status) {
            return Ok(Vec::new());
        }

        // Only JSON bodies are inspected; matching property names in free
        // text produces noise.
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) else {
            debug!("[PropertyAuth] Non-JSON response from {}, skipping", endpoint);
            return Ok(Vec::new());
        };

        let mut exposed = Vec::new();
        Self::collect_sensitive_keys(&value, &mut exposed);
        exposed.sort();
        exposed.dedup();

        let mut detections = Vec::new();
        if !exposed.is_empty() {
            detections.push(Detection {
                details: format!(
                    "Endpoint {} exposes sensitive object properties: {}.",
                    endpoint,
                    exposed.join(", ")
                ),
                remediation: REMEDIATION.to_string(),
            });
        }

        Ok(detections)
    }
}
