// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - API Security Scanner Engine
 * Main scan orchestration and coordination
 *
 * Fans the fixed OWASP API Top 10 scanner catalogue across the target
 * endpoint set, one unit per (endpoint, scanner) pairing, bounded by a
 * counting semaphore. Unit failures are contained and recorded as
 * synthetic findings; the run always goes to completion.
 *
 * @copyright 2025 Bountyy Oy
 * @license Proprietary
 */

use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, error, info, warn};

use crate::collector::FindingCollector;
use crate::config::ScannerConfig;
use crate::http_client::HttpClient;
use crate::types::{Detection, Finding, ScanResults};

pub mod bola;
pub mod broken_auth;
pub mod property_auth;
pub mod resource_consumption;
pub mod function_auth;
pub mod sensitive_flows;
pub mod ssrf;
pub mod misconfiguration;
pub mod inventory;
pub mod unsafe_consumption;

// Re-export scanner types for easy access
pub use bola::BolaScanner;
pub use broken_auth::BrokenAuthScanner;
pub use property_auth::PropertyAuthScanner;
pub use resource_consumption::ResourceConsumptionScanner;
pub use function_auth::FunctionAuthScanner;
pub use sensitive_flows::SensitiveFlowScanner;
pub use ssrf::SsrfScanner;
pub use misconfiguration::MisconfigurationScanner;
pub use inventory::InventoryScanner;
pub use unsafe_consumption::UnsafeConsumptionScanner;

/// Capability interface implemented by every vulnerability scanner.
///
/// A scanner issues one or more probes against the endpoint and applies its
/// own heuristic to the responses. Transport failures reach the scanner as
/// `ProbeOutcome::Failed` values, never as errors; an `Err` from `scan`
/// means the scanner itself gave up, and the engine converts it into a
/// synthetic finding. New scanners are added by registering another
/// implementation in the catalogue.
#[async_trait::async_trait]
pub trait ApiScanner: Send + Sync {
    /// Human-readable vulnerability label used to tag findings.
    fn name(&self) -> &'static str;

    /// Probe one endpoint and classify the responses.
    async fn scan(&self, endpoint: &str) -> Result<Vec<Detection>>;
}

pub struct ScanEngine {
    pub config: ScannerConfig,
    pub http_client: Arc<HttpClient>,
    scanners: Vec<Arc<dyn ApiScanner>>,
}

impl ScanEngine {
    /// Create an engine with the full OWASP API Top 10 catalogue.
    pub fn new(config: ScannerConfig) -> Result<Self> {
        let http_client = Arc::new(HttpClient::with_config(
            config.request_timeout_secs,
            config.user_agent.as_deref(),
        )?);

        let scanners: Vec<Arc<dyn ApiScanner>> = vec![
            Arc::new(BolaScanner::new(Arc::clone(&http_client))),
            Arc::new(BrokenAuthScanner::new(Arc::clone(&http_client))),
            Arc::new(PropertyAuthScanner::new(Arc::clone(&http_client))),
            Arc::new(ResourceConsumptionScanner::new(Arc::clone(&http_client))),
            Arc::new(FunctionAuthScanner::new(Arc::clone(&http_client))),
            Arc::new(SensitiveFlowScanner::new(Arc::clone(&http_client))),
            Arc::new(SsrfScanner::new(Arc::clone(&http_client))),
            Arc::new(MisconfigurationScanner::new(Arc::clone(&http_client))),
            Arc::new(InventoryScanner::new(Arc::clone(&http_client))),
            Arc::new(UnsafeConsumptionScanner::new(Arc::clone(&http_client))),
        ];

        Ok(Self {
            config,
            http_client,
            scanners,
        })
    }

    /// Create an engine with a custom scanner catalogue. Used by tests to
    /// exercise scheduling behavior with instrumented scanners.
    pub fn with_scanners(
        config: ScannerConfig,
        http_client: Arc<HttpClient>,
        scanners: Vec<Arc<dyn ApiScanner>>,
    ) -> Self {
        Self {
            config,
            http_client,
            scanners,
        }
    }

    pub fn scanner_count(&self) -> usize {
        self.scanners.len()
    }

    /// Run every scanner against every endpoint.
    ///
    /// Builds |endpoints| x |scanners| scan units and admits at most
    /// `max_concurrency` of them at a time. Each unit holds its semaphore
    /// permit for its whole run; the permit is released on every exit path.
    /// Returns only after every unit has reached a terminal state: no
    /// unit's failure can prevent any other unit from running or from
    /// contributing its result.
    pub async fn execute_scan(&self, endpoints: &HashSet<String>) -> ScanResults {
        let start = Instant::now();
        let started_at = chrono::Utc::now().to_rfc3339();

        let unit_count = endpoints.len() * self.scanners.len();
        info!(
            "Starting scan: {} endpoint(s) x {} scanner(s) = {} unit(s), concurrency={}",
            endpoints.len(),
            self.scanners.len(),
            unit_count,
            self.config.max_concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency));
        let collector = FindingCollector::new();

        let mut handles = Vec::with_capacity(unit_count);
        for endpoint in endpoints {
            for scanner in &self.scanners {
                let endpoint = endpoint.clone();
                let scanner = Arc::clone(scanner);
                let semaphore = Arc::clone(&semaphore);
                let collector = collector.clone();

                handles.push(tokio::spawn(async move {
                    // The semaphore is never closed, but a unit must not run
                    // unadmitted if that ever changes.
                    let _permit = match semaphore.acquire().await {
                        Ok(permit) => permit,
                        Err(_) => return,
                    };

                    run_scan_unit(scanner, &endpoint, &collector).await;
                }));
            }
        }

        // All-units-complete barrier. A panicked unit is logged; its
        // siblings are unaffected.
        for handle in handles {
            if let Err(e) = handle.await {
                error!("Scan unit panicked: {}", e);
            }
        }

        let findings = collector.into_findings().await;
        info!(
            "Scan complete: {} unit(s) executed, {} finding(s)",
            unit_count,
            findings.len()
        );

        ScanResults {
            endpoints_scanned: endpoints.len(),
            units_executed: unit_count,
            findings,
            started_at,
            completed_at: chrono::Utc::now().to_rfc3339(),
            duration_seconds: start.elapsed().as_secs_f64(),
        }
    }
}

/// Execute one (endpoint, scanner) pairing and record its outcome.
///
/// Failure containment happens here: a scanner error becomes exactly one
/// synthetic finding, never a propagated error. No retries.
async fn run_scan_unit(scanner: Arc<dyn ApiScanner>, endpoint: &str, collector: &FindingCollector) {
    debug!("[Unit] {} on {}", scanner.name(), endpoint);

    match scanner.scan(endpoint).await {
        Ok(detections) => {
            for detection in detections {
                collector
                    .record(Finding {
                        vulnerability: scanner.name().to_string(),
                        endpoint: endpoint.to_string(),
                        details: detection.details,
                        remediation: detection.remediation,
                    })
                    .await;
            }
        }
        Err(e) => {
            warn!("[Unit] {} failed on {}: {}", scanner.name(), endpoint, e);
            collector
                .record(Finding::scan_error(scanner.name(), endpoint, &e.to_string()))
                .await;
        }
    }
}
