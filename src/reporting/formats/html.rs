// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use crate::types::{Finding, ScanResults};

pub struct HtmlReportGenerator;

impl HtmlReportGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Render the findings collection as a standalone HTML document.
    /// Details and remediation texts embed response-derived content, so
    /// every cell is escaped.
    pub fn generate(&self, results: &ScanResults) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>API Security Scanner Report</title>
    <style>
        {}
    </style>
</head>
<body>
    <h1>API Security Scanner Report</h1>
    <p>Total vulnerabilities found: {}</p>
    {}
</body>
</html>"#,
            self.get_css(),
            results.findings.len(),
            self.generate_findings_section(&results.findings)
        )
    }

    fn get_css(&self) -> &'static str {
        r#"body { font-family: Arial, sans-serif; margin: 20px; }
        h1 { color: #2c3e50; }
        table { border-collapse: collapse; width: 100%; }
        th, td { border: 1px solid #ddd; padding: 8px; }
        th { background-color: #2980b9; color: white; }
        tr:nth-child(even) { background-color: #f2f2f2; }
        .vuln { color: #c0392b; font-weight: bold; }
        .remediation { color: #27ae60; }"#
    }

    fn generate_findings_section(&self, findings: &[Finding]) -> String {
        if findings.is_empty() {
            return "<p>No vulnerabilities detected.</p>".to_string();
        }

        let rows: String = findings.iter().map(|finding| self.generate_row(finding)).collect();

        format!(
            r#"<table>
        <thead>
            <tr>
                <th>Vulnerability</th>
                <th>Endpoint</th>
                <th>Details</th>
                <th>Remediation</th>
            </tr>
        </thead>
        <tbody>
{}        </tbody>
    </table>"#,
            rows
        )
    }

    fn generate_row(&self, finding: &Finding) -> String {
        format!(
            r#"            <tr>
                <td class="vuln">{}</td>
                <td><a href="{}" target="_blank">{}</a></td>
                <td>{}</td>
                <td class="remediation">{}</td>
            </tr>
"#,
            escape(&finding.vulnerability),
            escape(&finding.endpoint),
            escape(&finding.endpoint),
            escape(&finding.details),
            escape(&finding.remediation)
        )
    }
}

impl Default for HtmlReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
