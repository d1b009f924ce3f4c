use crate::cli::FormatArg;
use crate::support::{load_collected_or_exit, print_json_or_exit};
use ldsync_kernel::diff_collected;
use ldsync_kernel::render::render_drift_text;

pub fn run(before: String, after: String, format: FormatArg) {
    let before = load_collected_or_exit(&before);
    let after = load_collected_or_exit(&after);
    let report = diff_collected(&before, &after);

    match format {
        FormatArg::Json => print_json_or_exit(&report, "drift"),
        FormatArg::Text | FormatArg::Github => print!("{}", render_drift_text(&report)),
    }

    if report.drifted {
        std::process::exit(1);
    }
}
