// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::types::Finding;

/// Append-only sink for findings, shared by all concurrently running scan
/// units. Insertion order is the completion order of units; no dedup and no
/// sort. This is the only mutable state shared across a run.
#[derive(Clone, Default)]
pub struct FindingCollector {
    findings: Arc<Mutex<Vec<Finding>>>,
}

impl FindingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record(&self, finding: Finding) {
        self.findings.lock().await.push(finding);
    }

    pub async fn len(&self) -> usize {
        self.findings.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.findings.lock().await.is_empty()
    }

    /// Consume the collector and return the accumulated findings. Called
    /// once every unit has completed; if another clone is somehow still
    /// alive the contents are copied out instead.
    pub async fn into_findings(self) -> Vec<Finding> {
        match Arc::try_unwrap(self.findings) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => shared.lock().await.clone(),
        }
    }
}
