//! ldsync CLI: the `ldsync` command.
//!
//! Exit status: 0 when the check passes, 1 when it fails, 2 when inputs
//! cannot be loaded.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use ldsync_rules::RulesetName;
use tracing::debug;

fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!(level, "logging initialized");
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    let config = support::load_config_or_exit(cli.config.as_deref());

    match cli.command {
        Commands::Check {
            manifest,
            source_usage,
            collected,
            rulesets,
            require_source_routes,
            format,
            fail_on_warn,
        } => commands::check::run(commands::check::Args {
            manifest: support::require_path_or_exit(manifest, config.manifest_path(), "manifest"),
            source_usage: support::require_path_or_exit(
                source_usage,
                config.source_usage_path(),
                "source-usage",
            ),
            collected: support::require_path_or_exit(
                collected,
                config.collected_path(),
                "collected",
            ),
            rulesets: support::resolve_rulesets(rulesets, &config).unwrap_or_default(),
            require_source_routes,
            format: config.format_or(format),
            fail_on_warn: config.fail_on_warn_or(fail_on_warn),
        }),

        Commands::Coverage {
            manifest,
            collected,
            require,
            format,
            fail_on_warn,
        } => commands::coverage::run(
            support::require_path_or_exit(manifest, config.manifest_path(), "manifest"),
            support::require_path_or_exit(collected, config.collected_path(), "collected"),
            require,
            config.format_or(format),
            config.fail_on_warn_or(fail_on_warn),
        ),

        Commands::Lint {
            collected,
            rulesets,
            route,
            format,
            fail_on_warn,
        } => commands::lint::run(
            support::require_path_or_exit(collected, config.collected_path(), "collected"),
            support::resolve_rulesets(rulesets, &config)
                .filter(|names| !names.is_empty())
                .unwrap_or_else(|| RulesetName::ALL.to_vec()),
            route,
            config.format_or(format),
            config.fail_on_warn_or(fail_on_warn),
        ),

        Commands::Drift {
            before,
            after,
            format,
        } => commands::drift::run(before, after, config.format_or(format)),

        Commands::Rulesets { format } => commands::rulesets::run(config.format_or(format)),
    }
}
