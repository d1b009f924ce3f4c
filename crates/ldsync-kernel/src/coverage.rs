//! Manifest coverage: declared types versus collected output.

use crate::routes::{
    found_types, join_types, missing_types, route_universe, unlisted_route_issue,
};
use ldsync_model::{CollectedData, IssueCounts, Manifest, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const COVERAGE_CHECK_KIND: &str = "ldsync.coverage.v1";

pub const RULE_MISSING_ROUTE: &str = "coverage.missing_route";
pub const RULE_MISSING_TYPE: &str = "coverage.missing_type";
pub const RULE_UNLISTED_ROUTE: &str = "coverage.unlisted_route";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    pub total_routes: usize,
    pub missing_routes: usize,
    pub missing_types: usize,
    pub unlisted_routes: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub check_kind: String,
    pub ok: bool,
    pub all_routes: Vec<String>,
    /// Routes with at least one issue.
    pub issues_by_route: BTreeMap<String, Vec<ValidationIssue>>,
    pub summary: CoverageSummary,
}

impl CoverageReport {
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues_by_route.values().flatten()
    }
}

/// Reconcile the manifest against collected output.
///
/// `required_routes` must produce some structured data even when the
/// manifest lists nothing for them (typically every route a filesystem scan
/// found). A manifest entry with at least one type is implicitly required.
pub fn compute_coverage(
    manifest: &Manifest,
    collected: &CollectedData,
    required_routes: &[String],
) -> CoverageReport {
    let explicit: BTreeSet<&str> = required_routes.iter().map(String::as_str).collect();
    let all_routes = route_universe([
        manifest.routes.keys().map(String::as_str).collect::<Vec<_>>(),
        explicit.iter().copied().collect(),
        collected.routes.keys().map(String::as_str).collect(),
    ]);

    let mut issues_by_route = BTreeMap::new();
    let mut summary = CoverageSummary {
        total_routes: all_routes.len(),
        ..CoverageSummary::default()
    };

    for route in &all_routes {
        let entry = manifest.entry(route);
        let expected = entry.unwrap_or(&[]);
        let nodes = collected.nodes(route);
        let mut issues = Vec::new();

        let required = explicit.contains(route.as_str()) || !expected.is_empty();
        if required && nodes.is_empty() {
            summary.missing_routes += 1;
            issues.push(ValidationIssue::error(
                RULE_MISSING_ROUTE,
                route,
                if expected.is_empty() {
                    format!("route {route} is required but has no structured data")
                } else {
                    format!(
                        "route {route} expects {} but has no structured data",
                        join_types(expected)
                    )
                },
            ));
        }

        let found = found_types(nodes);
        for ty in missing_types(expected, &found) {
            summary.missing_types += 1;
            issues.push(ValidationIssue::error(
                RULE_MISSING_TYPE,
                route,
                format!("route {route} is missing expected type {ty}"),
            ));
        }

        if entry.is_none() && !nodes.is_empty() {
            summary.unlisted_routes += 1;
            issues.push(unlisted_route_issue(RULE_UNLISTED_ROUTE, route));
        }

        if !issues.is_empty() {
            issues_by_route.insert(route.clone(), issues);
        }
    }

    let counts = issues_by_route
        .values()
        .map(|issues| IssueCounts::of(issues))
        .fold(IssueCounts::default(), IssueCounts::add);
    summary.errors = counts.errors;
    summary.warnings = counts.warnings;

    CoverageReport {
        check_kind: COVERAGE_CHECK_KIND.to_string(),
        ok: counts.errors == 0,
        all_routes,
        issues_by_route,
        summary,
    }
}
