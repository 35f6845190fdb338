// Copyright (c) 2025 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::errors::ScannerError;

/// Load endpoints from a file, one URL per line. Blank lines are ignored.
pub fn load_endpoints(path: &Path) -> Result<Vec<String>, ScannerError> {
    let contents = fs::read_to_string(path).map_err(|source| ScannerError::EndpointFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Merge directly supplied URLs with an optional endpoint file into one
/// deduplicated target set. The scan operates on a set: input order carries
/// no meaning and duplicates collapse.
pub fn resolve_endpoints(
    urls: &[String],
    file: Option<&Path>,
) -> Result<HashSet<String>, ScannerError> {
    let mut endpoints: HashSet<String> = urls
        .iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect();

    if let Some(path) = file {
        endpoints.extend(load_endpoints(path)?);
    }

    if endpoints.is_empty() {
        return Err(ScannerError::Configuration(
            "no valid endpoints to scan".to_string(),
        ));
    }

    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_lines_are_trimmed_and_blanks_dropped() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http://a.example/api").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  http://b.example/api  ").unwrap();
        writeln!(file, "   ").unwrap();

        let endpoints = load_endpoints(file.path()).unwrap();
        assert_eq!(
            endpoints,
            vec![
                "http://a.example/api".to_string(),
                "http://b.example/api".to_string()
            ]
        );
    }

    #[test]
    fn cli_and_file_sources_union_without_duplicates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "http://a.example/api").unwrap();
        writeln!(file, "http://c.example/api").unwrap();

        let urls = vec![
            "http://a.example/api".to_string(),
            "http://b.example/api".to_string(),
        ];
        let endpoints = resolve_endpoints(&urls, Some(file.path())).unwrap();

        assert_eq!(endpoints.len(), 3);
        assert!(endpoints.contains("http://a.example/api"));
        assert!(endpoints.contains("http://b.example/api"));
        assert!(endpoints.contains("http://c.example/api"));
    }

    #[test]
    fn empty_union_is_a_configuration_error() {
        let result = resolve_endpoints(&[], None);
        assert!(matches!(result, Err(ScannerError::Configuration(_))));
    }

    #[test]
    fn missing_file_reports_the_path() {
        let result = load_endpoints(Path::new("/nonexistent/endpoints.txt"));
        assert!(matches!(result, Err(ScannerError::EndpointFile { .. })));
    }
}
