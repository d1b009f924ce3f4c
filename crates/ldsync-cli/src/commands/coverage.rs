use crate::cli::FormatArg;
use crate::support::{
    exit_on_verdict, load_collected_or_exit, load_manifest_or_exit, print_json_or_exit,
};
use ldsync_kernel::compute_coverage;
use ldsync_kernel::render::{coverage_annotations, render_coverage_text};

pub fn run(
    manifest: String,
    collected: String,
    require: Vec<String>,
    format: FormatArg,
    fail_on_warn: bool,
) {
    let manifest = load_manifest_or_exit(&manifest);
    let collected = load_collected_or_exit(&collected);
    let report = compute_coverage(&manifest, &collected, &require);

    match format {
        FormatArg::Text => print!("{}", render_coverage_text(&report)),
        FormatArg::Json => print_json_or_exit(&report, "coverage"),
        FormatArg::Github => print!("{}", coverage_annotations(&report)),
    }

    exit_on_verdict(report.ok, report.summary.warnings, fail_on_warn);
}
