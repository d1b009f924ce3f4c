//! Human and CI renderings of check reports.
//!
//! Text output follows the `[check-name] OK|FAIL (k=v, ...)` headline with
//! one `  - ` row per finding. GitHub output is one workflow command per
//! issue.

use crate::coverage::CoverageReport;
use crate::drift::DriftReport;
use crate::reality::{RealityCheckReport, RouteStatus};
use ldsync_model::{Severity, ValidationIssue};
use ldsync_rules::RulesetResult;
use std::collections::BTreeMap;
use std::fmt::Write;

fn verdict(ok: bool) -> &'static str {
    if ok { "OK" } else { "FAIL" }
}

fn issue_row(out: &mut String, indent: &str, issue: &ValidationIssue) {
    let marker = match issue.severity {
        Severity::Error => "",
        Severity::Warn => "WARN ",
    };
    let _ = writeln!(
        out,
        "{indent}- {marker}{} at {} ({})",
        issue.rule_id, issue.path, issue.message
    );
}

pub fn render_reality_text(report: &RealityCheckReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[reality-check] {} (routes={}, valid={}, errors={}, warnings={}, score={})",
        verdict(report.ok),
        summary.total_routes,
        summary.valid,
        summary.errors,
        summary.warnings,
        summary.score
    );
    for route in &report.routes {
        if route.status == RouteStatus::Valid && route.issues.is_empty() {
            continue;
        }
        let _ = writeln!(
            out,
            "  - {} {} (score={})",
            route.route, route.status, route.score
        );
        for issue in &route.issues {
            issue_row(&mut out, "    ", issue);
        }
    }
    let ghosts = report.ghost_routes();
    if !ghosts.is_empty() {
        let _ = writeln!(out, "  ghost routes: {}", ghosts.join(", "));
    }
    out
}

pub fn render_coverage_text(report: &CoverageReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[coverage] {} (routes={}, missingRoutes={}, missingTypes={}, unlistedRoutes={})",
        verdict(report.ok),
        summary.total_routes,
        summary.missing_routes,
        summary.missing_types,
        summary.unlisted_routes
    );
    for (route, issues) in &report.issues_by_route {
        let _ = writeln!(out, "  - {route}");
        for issue in issues {
            issue_row(&mut out, "    ", issue);
        }
    }
    out
}

/// Lint results keyed by route.
pub fn render_lint_text(label: &str, results: &BTreeMap<String, RulesetResult>) -> String {
    let ok = results.values().all(|result| result.ok);
    let errors: usize = results.values().map(|result| result.summary.errors).sum();
    let warnings: usize = results.values().map(|result| result.summary.warnings).sum();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[lint] {} (rulesets={label}, routes={}, errors={errors}, warnings={warnings})",
        verdict(ok),
        results.len()
    );
    for (route, result) in results {
        if result.issues.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  - {route} (score={})", result.score);
        for issue in &result.issues {
            issue_row(&mut out, "    ", issue);
        }
    }
    out
}

pub fn render_drift_text(report: &DriftReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[drift] {} (added={}, removed={}, changed={}, unchanged={})",
        if report.drifted { "DRIFT" } else { "OK" },
        report.added_routes.len(),
        report.removed_routes.len(),
        report.changed_routes.len(),
        report.unchanged_count
    );
    for route in &report.added_routes {
        let _ = writeln!(out, "  + {route}");
    }
    for route in &report.removed_routes {
        let _ = writeln!(out, "  - {route}");
    }
    for change in &report.changed_routes {
        let _ = write!(out, "  ~ {}", change.route);
        if !change.added_types.is_empty() {
            let _ = write!(out, " +[{}]", change.added_types.join(", "));
        }
        if !change.removed_types.is_empty() {
            let _ = write!(out, " -[{}]", change.removed_types.join(", "));
        }
        out.push('\n');
    }
    out
}

/// Escape workflow-command message data.
pub fn escape_data(raw: &str) -> String {
    raw.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a workflow-command property value.
pub fn escape_property(raw: &str) -> String {
    escape_data(raw).replace(':', "%3A").replace(',', "%2C")
}

/// One GitHub Actions annotation line for a route-scoped issue.
pub fn github_annotation(route: &str, issue: &ValidationIssue) -> String {
    let level = match issue.severity {
        Severity::Error => "error",
        Severity::Warn => "warning",
    };
    format!(
        "::{level} title={}::{}",
        escape_property(&issue.rule_id),
        escape_data(&format!("{route}: {}", issue.message))
    )
}

pub fn render_github<'a, I>(issues: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a ValidationIssue)>,
{
    let mut out = String::new();
    for (route, issue) in issues {
        out.push_str(&github_annotation(route, issue));
        out.push('\n');
    }
    out
}

pub fn reality_annotations(report: &RealityCheckReport) -> String {
    render_github(report.routes.iter().flat_map(|route| {
        route
            .issues
            .iter()
            .map(move |issue| (route.route.as_str(), issue))
    }))
}

pub fn coverage_annotations(report: &CoverageReport) -> String {
    render_github(
        report
            .issues_by_route
            .iter()
            .flat_map(|(route, issues)| issues.iter().map(move |issue| (route.as_str(), issue))),
    )
}

pub fn lint_annotations(results: &BTreeMap<String, RulesetResult>) -> String {
    render_github(results.iter().flat_map(|(route, result)| {
        result
            .issues
            .iter()
            .map(move |issue| (route.as_str(), issue))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::compute_coverage;
    use crate::drift::diff_collected;
    use crate::reality::perform_reality_check;
    use ldsync_model::{CollectedData, Manifest, Node, SourceUsageInfo, TypeName};
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        Node::from_value(value).expect("object")
    }

    fn sample_report() -> RealityCheckReport {
        let manifest = Manifest::new()
            .with_route("/", vec![TypeName::Organization])
            .with_route("/blog", vec![TypeName::Article]);
        let usage = [
            SourceUsageInfo::new("/", true, true),
            SourceUsageInfo::new("/promo", true, true),
        ];
        let collected = CollectedData::new()
            .with_route(
                "/",
                vec![node(json!({"@context": "https://schema.org", "@type": "Organization", "name": "Acme"}))],
            )
            .with_route(
                "/promo",
                vec![node(json!({"@context": "https://schema.org", "@type": "Product", "name": "Widget"}))],
            );
        perform_reality_check(&manifest, &usage, &collected)
    }

    #[test]
    fn reality_text_lists_only_routes_with_findings() {
        insta::assert_snapshot!(render_reality_text(&sample_report()), @r"
        [reality-check] FAIL (routes=3, valid=1, errors=1, warnings=1, score=96)
          - /blog missing_in_source (score=90)
            - reality.missing_source_component at /blog (route /blog expects Article but its source has no working structured-data component)
          - /promo missing_from_manifest (score=98)
            - WARN reality.unlisted_route at /promo (route /promo outputs structured data but is not listed in the manifest)
          ghost routes: /blog
        ");
    }

    #[test]
    fn coverage_text_groups_issues_by_route() {
        let manifest =
            Manifest::new().with_route("/", vec![TypeName::Organization, TypeName::WebSite]);
        let collected = CollectedData::new()
            .with_route("/", vec![node(json!({"@type": "Organization", "name": "Acme"}))]);
        let report = compute_coverage(&manifest, &collected, &[]);
        insta::assert_snapshot!(render_coverage_text(&report), @r"
        [coverage] FAIL (routes=1, missingRoutes=0, missingTypes=1, unlistedRoutes=0)
          - /
            - coverage.missing_type at / (route / is missing expected type WebSite)
        ");
    }

    #[test]
    fn drift_text_marks_added_removed_and_changed() {
        let before = CollectedData::new()
            .with_route("/", vec![node(json!({"@type": "Organization"}))])
            .with_route("/old", vec![node(json!({"@type": "WebPage"}))]);
        let after = CollectedData::new()
            .with_route("/", vec![node(json!({"@type": "WebSite"}))])
            .with_route("/new", vec![node(json!({"@type": "WebPage"}))]);
        insta::assert_snapshot!(render_drift_text(&diff_collected(&before, &after)), @r"
        [drift] DRIFT (added=1, removed=1, changed=1, unchanged=0)
          + /new
          - /old
          ~ / +[WebSite] -[Organization]
        ");
    }

    #[test]
    fn annotations_escape_control_characters() {
        let issue = ValidationIssue::error("google.article.image", "nodes[0]", "50% done\r\nnext");
        assert_eq!(
            github_annotation("/blog", &issue),
            "::error title=google.article.image::/blog: 50%25 done%0D%0Anext"
        );
        let warn = ValidationIssue::warn("x:y,z", "nodes[0]", "m");
        assert_eq!(
            github_annotation("/", &warn),
            "::warning title=x%3Ay%2Cz::/: m"
        );
    }

    #[test]
    fn reality_annotations_follow_route_order() {
        let rendered = reality_annotations(&sample_report());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("::error title=reality.missing_source_component::/blog: "));
        assert!(lines[1].starts_with("::warning title=reality.unlisted_route::/promo: "));
    }
}
