use crate::cli::FormatArg;
use crate::support::{exit_on_verdict, load_collected_or_exit, print_json_or_exit};
use ldsync_kernel::render::{lint_annotations, render_lint_text};
use ldsync_rules::{RulesetName, RulesetResult, run_multiple_rulesets};
use serde_json::json;
use std::collections::BTreeMap;

const CHECK_KIND: &str = "ldsync.lint.v1";

pub fn run(
    collected: String,
    rulesets: Vec<RulesetName>,
    route: Option<String>,
    format: FormatArg,
    fail_on_warn: bool,
) {
    let collected = load_collected_or_exit(&collected);
    if let Some(route) = &route
        && !collected.routes.contains_key(route)
    {
        eprintln!("error: route {route} not found in collected data");
        std::process::exit(2);
    }

    let results: BTreeMap<String, RulesetResult> = collected
        .routes
        .iter()
        .filter(|(name, _)| route.as_ref().is_none_or(|only| only == *name))
        .map(|(name, nodes)| (name.clone(), run_multiple_rulesets(&rulesets, nodes)))
        .collect();

    let ok = results.values().all(|result| result.ok);
    let errors: usize = results.values().map(|result| result.summary.errors).sum();
    let warnings: usize = results.values().map(|result| result.summary.warnings).sum();
    let label = rulesets
        .iter()
        .map(|name| name.as_str())
        .collect::<Vec<_>>()
        .join(",");

    match format {
        FormatArg::Text => print!("{}", render_lint_text(&label, &results)),
        FormatArg::Json => print_json_or_exit(
            &json!({
                "checkKind": CHECK_KIND,
                "ok": ok,
                "rulesets": rulesets,
                "summary": {"errors": errors, "warnings": warnings},
                "routes": results,
            }),
            "lint",
        ),
        FormatArg::Github => print!("{}", lint_annotations(&results)),
    }

    exit_on_verdict(ok, warnings, fail_on_warn);
}
