//! Three-way reality check: manifest × source usage × collected output.
//!
//! Every route in the union of the three inputs is classified into exactly
//! one [`RouteStatus`] by walking [`CLASSIFICATION_RULES`] top to bottom;
//! the first matching row wins.

use crate::coverage::CoverageReport;
use crate::routes::{
    found_types, join_types, missing_types, route_universe, unlisted_route_issue,
};
use ldsync_model::{
    CollectedData, IssueCounts, Manifest, Node, SourceUsageInfo, TypeName, ValidationIssue,
    aggregate_score, score_issues,
};
use ldsync_rules::validate_nodes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

pub const REALITY_CHECK_KIND: &str = "ldsync.reality_check.v1";
pub const REALITY_SCHEMA: u32 = 1;

pub const RULE_MISSING_SOURCE_COMPONENT: &str = "reality.missing_source_component";
pub const RULE_MISSING_HTML_OUTPUT: &str = "reality.missing_html_output";
pub const RULE_UNLISTED_ROUTE: &str = "reality.unlisted_route";
pub const RULE_TYPE_MISMATCH: &str = "reality.type_mismatch";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    MissingInSource,
    MissingInHtml,
    MissingFromManifest,
    TypeMismatch,
    Valid,
}

impl RouteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingInSource => "missing_in_source",
            Self::MissingInHtml => "missing_in_html",
            Self::MissingFromManifest => "missing_from_manifest",
            Self::TypeMismatch => "type_mismatch",
            Self::Valid => "valid",
        }
    }
}

impl std::fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the classifier knows about one route.
#[derive(Debug, Clone)]
pub struct RouteFacts<'a> {
    pub route: &'a str,
    pub expected: &'a [TypeName],
    pub source_has_component: bool,
    pub nodes: &'a [Node],
    pub found_types: Vec<String>,
    pub missing_types: Vec<TypeName>,
}

impl<'a> RouteFacts<'a> {
    pub fn new(
        route: &'a str,
        expected: &'a [TypeName],
        source_has_component: bool,
        nodes: &'a [Node],
    ) -> Self {
        let found_types = found_types(nodes);
        let missing_types = missing_types(expected, &found_types);
        Self {
            route,
            expected,
            source_has_component,
            nodes,
            found_types,
            missing_types,
        }
    }

    pub fn declares_types(&self) -> bool {
        !self.expected.is_empty()
    }

    pub fn has_output(&self) -> bool {
        !self.nodes.is_empty()
    }
}

pub type RoutePredicate = fn(&RouteFacts<'_>) -> bool;
pub type IssueBuilder = fn(&RouteFacts<'_>) -> ValidationIssue;

/// One row of the decision table.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub status: RouteStatus,
    pub applies: RoutePredicate,
    pub issue: IssueBuilder,
}

/// The decision table, in priority order. Routes matching no row are valid.
pub const CLASSIFICATION_RULES: &[ClassificationRule] = &[
    ClassificationRule {
        status: RouteStatus::MissingInSource,
        applies: |f| f.declares_types() && !f.source_has_component,
        issue: |f| {
            ValidationIssue::error(
                RULE_MISSING_SOURCE_COMPONENT,
                f.route,
                format!(
                    "route {} expects {} but its source has no working structured-data component",
                    f.route,
                    join_types(f.expected)
                ),
            )
        },
    },
    ClassificationRule {
        status: RouteStatus::MissingInHtml,
        applies: |f| f.source_has_component && !f.has_output(),
        issue: |f| {
            ValidationIssue::error(
                RULE_MISSING_HTML_OUTPUT,
                f.route,
                format!(
                    "route {} renders a structured-data component in source but the built output has none",
                    f.route
                ),
            )
        },
    },
    ClassificationRule {
        status: RouteStatus::MissingFromManifest,
        applies: |f| f.has_output() && !f.declares_types(),
        issue: |f| unlisted_route_issue(RULE_UNLISTED_ROUTE, f.route),
    },
    ClassificationRule {
        status: RouteStatus::TypeMismatch,
        applies: |f| f.declares_types() && f.has_output() && !f.missing_types.is_empty(),
        issue: |f| {
            ValidationIssue::error(
                RULE_TYPE_MISMATCH,
                f.route,
                format!(
                    "route {} is missing expected types: {} (found: {})",
                    f.route,
                    join_types(&f.missing_types),
                    if f.found_types.is_empty() {
                        "none".to_string()
                    } else {
                        f.found_types.join(", ")
                    }
                ),
            )
        },
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: RouteStatus,
    pub issue: Option<ValidationIssue>,
}

/// First matching row of [`CLASSIFICATION_RULES`], or `valid`.
pub fn classify_route(facts: &RouteFacts<'_>) -> Classification {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.applies)(facts))
        .map(|rule| Classification {
            status: rule.status,
            issue: Some((rule.issue)(facts)),
        })
        .unwrap_or(Classification {
            status: RouteStatus::Valid,
            issue: None,
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRealityReport {
    pub route: String,
    pub status: RouteStatus,
    pub source_has_component: bool,
    pub html_has_schema: bool,
    pub expected_types: Vec<TypeName>,
    pub found_types: Vec<String>,
    pub issues: Vec<ValidationIssue>,
    pub score: u32,
}

impl RouteRealityReport {
    pub fn counts(&self) -> IssueCounts {
        IssueCounts::of(&self.issues)
    }
}

/// Classify one route and score it.
///
/// Output nodes go through base validation first; the classification issue
/// (if any) is appended after those.
pub fn evaluate_route(facts: &RouteFacts<'_>) -> RouteRealityReport {
    let mut issues = if facts.has_output() {
        validate_nodes(facts.nodes)
    } else {
        Vec::new()
    };
    let classification = classify_route(facts);
    issues.extend(classification.issue);
    let score = score_issues(&issues);

    debug!(
        route = facts.route,
        status = classification.status.as_str(),
        issues = issues.len(),
        score,
        "classified route"
    );

    RouteRealityReport {
        route: facts.route.to_string(),
        status: classification.status,
        source_has_component: facts.source_has_component,
        html_has_schema: facts.has_output(),
        expected_types: facts.expected.to_vec(),
        found_types: facts.found_types.clone(),
        issues,
        score,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealitySummary {
    pub total_routes: usize,
    pub valid: usize,
    pub missing_in_source: usize,
    pub missing_in_html: usize,
    pub missing_from_manifest: usize,
    pub type_mismatch: usize,
    pub errors: usize,
    pub warnings: usize,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealityCheckReport {
    pub schema: u32,
    pub check_kind: String,
    pub ok: bool,
    pub summary: RealitySummary,
    pub routes: Vec<RouteRealityReport>,
}

impl RealityCheckReport {
    /// Build the aggregate from per-route reports. Routes are sorted by route.
    pub fn from_routes(mut routes: Vec<RouteRealityReport>) -> Self {
        routes.sort_by(|a, b| a.route.cmp(&b.route));

        let mut summary = RealitySummary {
            total_routes: routes.len(),
            ..RealitySummary::default()
        };
        for route in &routes {
            match route.status {
                RouteStatus::Valid => summary.valid += 1,
                RouteStatus::MissingInSource => summary.missing_in_source += 1,
                RouteStatus::MissingInHtml => summary.missing_in_html += 1,
                RouteStatus::MissingFromManifest => summary.missing_from_manifest += 1,
                RouteStatus::TypeMismatch => summary.type_mismatch += 1,
            }
            let counts = route.counts();
            summary.errors += counts.errors;
            summary.warnings += counts.warnings;
        }
        let scores: Vec<u32> = routes.iter().map(|route| route.score).collect();
        summary.score = aggregate_score(&scores);

        Self {
            schema: REALITY_SCHEMA,
            check_kind: REALITY_CHECK_KIND.to_string(),
            ok: summary.errors == 0,
            summary,
            routes,
        }
    }

    pub fn route(&self, route: &str) -> Option<&RouteRealityReport> {
        self.routes.iter().find(|entry| entry.route == route)
    }

    /// Routes declared in the manifest with no working source component.
    pub fn ghost_routes(&self) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|entry| entry.status == RouteStatus::MissingInSource)
            .map(|entry| entry.route.as_str())
            .collect()
    }
}

/// Run the three-way check.
pub fn perform_reality_check(
    manifest: &Manifest,
    source_usage: &[SourceUsageInfo],
    collected: &CollectedData,
) -> RealityCheckReport {
    // A route scanned more than once has a component if any scan found one.
    let mut working: BTreeMap<&str, bool> = BTreeMap::new();
    for info in source_usage {
        *working.entry(info.route.as_str()).or_default() |= info.has_working_component();
    }

    let universe = route_universe([
        manifest.routes.keys().map(String::as_str).collect::<Vec<_>>(),
        working.keys().copied().collect(),
        collected.routes.keys().map(String::as_str).collect(),
    ]);

    let routes: Vec<RouteRealityReport> = universe
        .iter()
        .map(|route| {
            let facts = RouteFacts::new(
                route,
                manifest.expected(route),
                working.get(route.as_str()).copied().unwrap_or(false),
                collected.nodes(route),
            );
            evaluate_route(&facts)
        })
        .collect();

    let report = RealityCheckReport::from_routes(routes);
    info!(
        routes = report.summary.total_routes,
        errors = report.summary.errors,
        warnings = report.summary.warnings,
        score = report.summary.score,
        "reality check complete"
    );
    report
}

/// Append extra issues to routes and re-score them.
///
/// Each touched route is scored again from its merged issue list. Routes
/// not yet in the report are added as `valid` entries with no source or
/// output facts.
pub fn merge_route_issues(
    report: RealityCheckReport,
    extra: &BTreeMap<String, Vec<ValidationIssue>>,
) -> RealityCheckReport {
    let mut routes = report.routes;
    for (route, issues) in extra {
        if issues.is_empty() {
            continue;
        }
        let index = match routes.iter().position(|entry| &entry.route == route) {
            Some(index) => index,
            None => {
                routes.push(RouteRealityReport {
                    route: route.clone(),
                    status: RouteStatus::Valid,
                    source_has_component: false,
                    html_has_schema: false,
                    expected_types: Vec::new(),
                    found_types: Vec::new(),
                    issues: Vec::new(),
                    score: 0,
                });
                routes.len() - 1
            }
        };
        let entry = &mut routes[index];
        entry.issues.extend(issues.iter().cloned());
        entry.score = score_issues(&entry.issues);
    }
    RealityCheckReport::from_routes(routes)
}

/// Fold coverage findings into a reality report.
pub fn merge_coverage(report: RealityCheckReport, coverage: &CoverageReport) -> RealityCheckReport {
    merge_route_issues(report, &coverage.issues_by_route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ldsync_model::{Severity, stable_stringify_serialize};
    use serde_json::{Value, json};

    fn nodes(values: Vec<Value>) -> Vec<Node> {
        values.into_iter().filter_map(Node::from_value).collect()
    }

    fn organization() -> Value {
        json!({"@context": "https://schema.org", "@type": "Organization", "name": "Acme"})
    }

    fn article() -> Value {
        json!({"@context": "https://schema.org", "@type": "Article", "headline": "Launch notes"})
    }

    fn status_of(report: &RealityCheckReport, route: &str) -> RouteStatus {
        report.route(route).expect("route present").status
    }

    #[test]
    fn declared_route_without_source_is_missing_in_source() {
        let manifest = Manifest::new().with_route("/blog", vec![TypeName::Article]);
        let report = perform_reality_check(&manifest, &[], &CollectedData::new());

        let route = report.route("/blog").unwrap();
        assert_eq!(route.status, RouteStatus::MissingInSource);
        assert_eq!(route.issues.len(), 1);
        assert_eq!(route.issues[0].rule_id, RULE_MISSING_SOURCE_COMPONENT);
        assert_eq!(route.issues[0].severity, Severity::Error);
        assert_eq!(route.score, 90);
        assert!(!report.ok);
        assert_eq!(report.ghost_routes(), vec!["/blog"]);
    }

    #[test]
    fn source_check_wins_even_when_output_matches() {
        let manifest = Manifest::new().with_route("/blog", vec![TypeName::Article]);
        let collected = CollectedData::new().with_route("/blog", nodes(vec![article()]));
        let usage = [SourceUsageInfo::new("/blog", true, false)];
        let report = perform_reality_check(&manifest, &usage, &collected);
        assert_eq!(status_of(&report, "/blog"), RouteStatus::MissingInSource);
        assert!(report.route("/blog").unwrap().html_has_schema);
    }

    #[test]
    fn working_component_without_output_is_missing_in_html() {
        let usage = [SourceUsageInfo::new("/about", true, true)];
        let report = perform_reality_check(&Manifest::new(), &usage, &CollectedData::new());
        let route = report.route("/about").unwrap();
        assert_eq!(route.status, RouteStatus::MissingInHtml);
        assert_eq!(route.issues[0].rule_id, RULE_MISSING_HTML_OUTPUT);
    }

    #[test]
    fn undeclared_output_is_missing_from_manifest_warning() {
        let manifest = Manifest::new().with_route("/promo", vec![]);
        let collected = CollectedData::new().with_route("/promo", nodes(vec![organization()]));
        let usage = [SourceUsageInfo::new("/promo", true, true)];
        let report = perform_reality_check(&manifest, &usage, &collected);

        let route = report.route("/promo").unwrap();
        assert_eq!(route.status, RouteStatus::MissingFromManifest);
        assert_eq!(route.issues.len(), 1);
        assert_eq!(route.issues[0].rule_id, RULE_UNLISTED_ROUTE);
        assert_eq!(route.score, 98);
        assert!(report.ok);
    }

    #[test]
    fn partial_output_is_type_mismatch() {
        let manifest =
            Manifest::new().with_route("/", vec![TypeName::Organization, TypeName::WebSite]);
        let collected = CollectedData::new().with_route("/", nodes(vec![organization()]));
        let usage = [SourceUsageInfo::new("/", true, true)];
        let report = perform_reality_check(&manifest, &usage, &collected);

        let route = report.route("/").unwrap();
        assert_eq!(route.status, RouteStatus::TypeMismatch);
        assert_eq!(route.issues.len(), 1);
        assert!(route.issues[0].message.contains("WebSite"));
        assert!(!route.issues[0].message.contains("Organization,"));
        assert_eq!(route.found_types, vec!["Organization"]);
    }

    #[test]
    fn reconciled_route_is_valid() {
        let manifest = Manifest::new().with_route("/", vec![TypeName::Organization]);
        let collected = CollectedData::new().with_route("/", nodes(vec![organization()]));
        let usage = [SourceUsageInfo::new("/", true, true)];
        let report = perform_reality_check(&manifest, &usage, &collected);
        assert_eq!(status_of(&report, "/"), RouteStatus::Valid);
        assert_eq!(report.summary.score, 100);
        assert!(report.ok);
    }

    #[test]
    fn base_validation_issues_precede_classification_issue() {
        let manifest = Manifest::new().with_route("/", vec![TypeName::WebSite]);
        let collected =
            CollectedData::new().with_route("/", nodes(vec![json!({"@type": "Organization"})]));
        let usage = [SourceUsageInfo::new("/", true, true)];
        let report = perform_reality_check(&manifest, &usage, &collected);

        let ids: Vec<&str> = report.routes[0]
            .issues
            .iter()
            .map(|i| i.rule_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "schema.context.missing",
                "schema.organization.name",
                RULE_TYPE_MISMATCH
            ]
        );
        assert_eq!(report.routes[0].score, 70);
    }

    #[test]
    fn route_with_nothing_anywhere_is_trivially_valid() {
        let usage = [SourceUsageInfo::new("/legal", false, false)];
        let report = perform_reality_check(&Manifest::new(), &usage, &CollectedData::new());
        let route = report.route("/legal").unwrap();
        assert_eq!(route.status, RouteStatus::Valid);
        assert!(route.issues.is_empty());
        assert_eq!(route.score, 100);
    }

    #[test]
    fn duplicate_source_scans_are_or_combined() {
        let manifest = Manifest::new().with_route("/", vec![TypeName::Organization]);
        let collected = CollectedData::new().with_route("/", nodes(vec![organization()]));
        let usage = [
            SourceUsageInfo::new("/", false, false),
            SourceUsageInfo::new("/", true, true),
        ];
        let report = perform_reality_check(&manifest, &usage, &collected);
        assert_eq!(status_of(&report, "/"), RouteStatus::Valid);
    }

    #[test]
    fn empty_input_is_vacuously_perfect() {
        let report = perform_reality_check(&Manifest::new(), &[], &CollectedData::new());
        assert!(report.routes.is_empty());
        assert_eq!(report.summary.score, 100);
        assert!(report.ok);
    }

    #[test]
    fn route_universe_covers_all_three_sources_sorted() {
        let manifest = Manifest::new().with_route("/m", vec![TypeName::WebPage]);
        let usage = [SourceUsageInfo::new("/s", true, true)];
        let collected = CollectedData::new().with_route("/c", nodes(vec![organization()]));
        let report = perform_reality_check(&manifest, &usage, &collected);
        let routes: Vec<&str> = report.routes.iter().map(|r| r.route.as_str()).collect();
        assert_eq!(routes, vec!["/c", "/m", "/s"]);
        assert_eq!(report.summary.total_routes, 3);
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let manifest = Manifest::new()
            .with_route("/", vec![TypeName::Organization, TypeName::WebSite])
            .with_route("/blog", vec![TypeName::Article]);
        let collected = CollectedData::new()
            .with_route("/", nodes(vec![organization()]))
            .with_route("/x", nodes(vec![article()]));
        let usage = [
            SourceUsageInfo::new("/", true, true),
            SourceUsageInfo::new("/x", true, true),
        ];
        let run = || {
            stable_stringify_serialize(&perform_reality_check(&manifest, &usage, &collected))
                .expect("report serializes")
        };
        let first = run();
        let second = run();
        assert!(first.starts_with(r#"{"checkKind":"ldsync.reality_check.v1""#));
        assert_eq!(first, second);
    }

    #[test]
    fn classify_route_follows_table_order() {
        let expected = [TypeName::Article];
        let facts = RouteFacts::new("/blog", &expected, false, &[]);
        let classification = classify_route(&facts);
        assert_eq!(classification.status, RouteStatus::MissingInSource);

        let statuses: Vec<RouteStatus> = CLASSIFICATION_RULES.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                RouteStatus::MissingInSource,
                RouteStatus::MissingInHtml,
                RouteStatus::MissingFromManifest,
                RouteStatus::TypeMismatch,
            ]
        );
    }

    #[test]
    fn twenty_errors_clamp_to_zero() {
        let many: BTreeMap<String, Vec<ValidationIssue>> = [(
            "/".to_string(),
            (0..20)
                .map(|i| ValidationIssue::error(format!("test.route.e{i}"), "/", "boom"))
                .collect(),
        )]
        .into_iter()
        .collect();
        let report = merge_route_issues(
            perform_reality_check(&Manifest::new(), &[], &CollectedData::new()),
            &many,
        );
        assert_eq!(report.routes[0].score, 0);
        assert_eq!(report.summary.score, 0);
    }

    #[test]
    fn merging_rescoring_uses_merged_issue_list() {
        let manifest = Manifest::new().with_route("/blog", vec![TypeName::Article]);
        let report = perform_reality_check(&manifest, &[], &CollectedData::new());
        assert_eq!(report.routes[0].score, 90);

        let extra: BTreeMap<String, Vec<ValidationIssue>> = [(
            "/blog".to_string(),
            vec![
                ValidationIssue::error("coverage.missing_route", "/blog", "no data"),
                ValidationIssue::warn("google.article.author", "nodes[0]", "no author"),
            ],
        )]
        .into_iter()
        .collect();
        let merged = merge_route_issues(report, &extra);
        let route = merged.route("/blog").unwrap();
        assert_eq!(route.issues.len(), 3);
        assert_eq!(route.score, 78);
        assert_eq!(merged.summary.errors, 2);
        assert_eq!(merged.summary.warnings, 1);
        assert_eq!(merged.summary.score, 78);
    }
}
