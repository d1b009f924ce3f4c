use crate::cli::FormatArg;
use crate::support::{
    exit_on_verdict, load_collected_or_exit, load_manifest_or_exit, load_source_usage_or_exit,
    print_json_or_exit,
};
use ldsync_kernel::render::{reality_annotations, render_reality_text};
use ldsync_kernel::{compute_coverage, merge_coverage, merge_route_issues, perform_reality_check};
use ldsync_model::ValidationIssue;
use ldsync_rules::{RulesetName, run_multiple_rulesets};
use std::collections::BTreeMap;
use tracing::info;

pub struct Args {
    pub manifest: String,
    pub source_usage: String,
    pub collected: String,
    pub rulesets: Vec<RulesetName>,
    pub require_source_routes: bool,
    pub format: FormatArg,
    pub fail_on_warn: bool,
}

pub fn run(args: Args) {
    let manifest = load_manifest_or_exit(&args.manifest);
    let usage = load_source_usage_or_exit(&args.source_usage);
    let collected = load_collected_or_exit(&args.collected);

    let mut report = perform_reality_check(&manifest, &usage, &collected);

    if args.require_source_routes {
        let required: Vec<String> = usage.iter().map(|info| info.route.clone()).collect();
        let coverage = compute_coverage(&manifest, &collected, &required);
        info!(
            issues = coverage.issues().count(),
            "merging coverage findings"
        );
        report = merge_coverage(report, &coverage);
    }

    if !args.rulesets.is_empty() {
        let extra: BTreeMap<String, Vec<ValidationIssue>> = collected
            .routes
            .iter()
            .map(|(route, nodes)| {
                (
                    route.clone(),
                    run_multiple_rulesets(&args.rulesets, nodes).issues,
                )
            })
            .collect();
        info!(
            rulesets = args.rulesets.len(),
            issues = extra.values().map(Vec::len).sum::<usize>(),
            "merging ruleset findings"
        );
        report = merge_route_issues(report, &extra);
    }

    match args.format {
        FormatArg::Text => print!("{}", render_reality_text(&report)),
        FormatArg::Json => print_json_or_exit(&report, "reality-check"),
        FormatArg::Github => print!("{}", reality_annotations(&report)),
    }

    exit_on_verdict(report.ok, report.summary.warnings, args.fail_on_warn);
}
