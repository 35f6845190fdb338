// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Report Tests
 * Tests for JSON/HTML rendering, order insensitivity and artifact writing
 *
 * @copyright 2025 Bountyy Oy
 * @license Proprietary
 */

use luotain_scanner::reporting::formats::html::HtmlReportGenerator;
use luotain_scanner::reporting::formats::json::JsonReportGenerator;
use luotain_scanner::reporting::ReportEngine;
use luotain_scanner::types::{Finding, ScanResults};

fn finding(vulnerability: &str, endpoint: &str, details: &str) -> Finding {
    Finding {
        vulnerability: vulnerability.to_string(),
        endpoint: endpoint.to_string(),
        details: details.to_string(),
        remediation: "Fix the thing.".to_string(),
    }
}

fn results_with(findings: Vec<Finding>) -> ScanResults {
    ScanResults {
        endpoints_scanned: 2,
        units_executed: 20,
        findings,
        started_at: "2025-06-01T10:00:00+00:00".to_string(),
        completed_at: "2025-06-01T10:00:05+00:00".to_string(),
        duration_seconds: 5.0,
    }
}

#[test]
fn json_is_a_direct_findings_serialization() {
    let findings = vec![
        finding("API1", "http://a.example/api", "cross-object access"),
        finding("API2", "http://b.example/api", "no auth required"),
    ];
    let json = JsonReportGenerator::new()
        .generate(&results_with(findings.clone()))
        .unwrap();

    let parsed: Vec<Finding> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, findings);
}

#[test]
fn permuted_findings_serialize_to_the_same_record_multiset() {
    let forward = vec![
        finding("API1", "http://a.example/api", "one"),
        finding("API2", "http://a.example/api", "two"),
        finding("API3", "http://b.example/api", "three"),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    let render = |findings: Vec<Finding>| -> Vec<String> {
        let json = JsonReportGenerator::new()
            .generate(&results_with(findings))
            .unwrap();
        let records: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        let mut keys: Vec<String> = records.iter().map(|record| record.to_string()).collect();
        keys.sort();
        keys
    };

    assert_eq!(render(forward), render(reversed));
}

#[test]
fn empty_run_renders_empty_artifacts() {
    let results = results_with(Vec::new());

    let json = JsonReportGenerator::new().generate(&results).unwrap();
    let parsed: Vec<Finding> = serde_json::from_str(&json).unwrap();
    assert!(parsed.is_empty());

    let html = HtmlReportGenerator::new().generate(&results);
    assert!(html.contains("No vulnerabilities detected."));
    assert!(html.contains("Total vulnerabilities found: 0"));
    assert!(!html.contains("<table>"));
}

#[test]
fn html_renders_one_row_per_finding() {
    let results = results_with(vec![
        finding("API1", "http://a.example/api", "one"),
        finding("API2", "http://b.example/api", "two"),
    ]);

    let html = HtmlReportGenerator::new().generate(&results);
    assert_eq!(html.matches(r#"<td class="vuln">"#).count(), 2);
    assert!(html.contains("Total vulnerabilities found: 2"));
}

#[test]
fn html_escapes_response_derived_text() {
    let results = results_with(vec![finding(
        "API8",
        "http://a.example/api",
        r#"body contained <script>alert("x")</script>"#,
    )]);

    let html = HtmlReportGenerator::new().generate(&results);
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains(r#"<script>alert("#));
}

#[test]
fn report_files_are_written_with_timestamped_names() {
    let dir = tempfile::tempdir().unwrap();
    let results = results_with(vec![finding("API1", "http://a.example/api", "one")]);

    let paths = ReportEngine::new()
        .generate_reports(&results, dir.path())
        .unwrap();

    assert!(paths.json.exists());
    assert!(paths.html.exists());

    let json_name = paths.json.file_name().unwrap().to_string_lossy().to_string();
    assert!(json_name.starts_with("api_scan_report_"));
    assert!(json_name.ends_with(".json"));

    let html_name = paths.html.file_name().unwrap().to_string_lossy().to_string();
    assert!(html_name.starts_with("api_scan_report_"));
    assert!(html_name.ends_with(".html"));

    let json_contents = std::fs::read_to_string(&paths.json).unwrap();
    let parsed: Vec<Finding> = serde_json::from_str(&json_contents).unwrap();
    assert_eq!(parsed.len(), 1);
}
