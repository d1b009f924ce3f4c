use crate::cli::FormatArg;
use ldsync_model::{CollectedData, LoadError, Manifest, SourceUsageInfo};
use ldsync_rules::{RulesetName, parse_ruleset_names, unknown_ruleset_names};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "ldsync.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// `rulesets = ["google"]` or `rulesets = "google,ai-citation"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RulesetList {
    List(Vec<String>),
    Csv(String),
}

impl RulesetList {
    pub fn joined(&self) -> String {
        match self {
            Self::List(names) => names.join(","),
            Self::Csv(raw) => raw.clone(),
        }
    }
}

/// Contents of `ldsync.toml`. Flags always win over these values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub manifest: Option<String>,
    pub source_usage: Option<String>,
    pub collected: Option<String>,
    pub rulesets: Option<RulesetList>,
    pub fail_on_warn: Option<bool>,
    pub format: Option<FormatArg>,

    /// Relative input paths are resolved against this directory.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Config {
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    fn resolve(&self, value: &Option<String>) -> Option<String> {
        let value = value.as_ref()?;
        let path = Path::new(value);
        match &self.base_dir {
            Some(base) if path.is_relative() && !base.as_os_str().is_empty() => {
                Some(base.join(path).to_string_lossy().into_owned())
            }
            _ => Some(value.clone()),
        }
    }

    pub fn manifest_path(&self) -> Option<String> {
        self.resolve(&self.manifest)
    }

    pub fn source_usage_path(&self) -> Option<String> {
        self.resolve(&self.source_usage)
    }

    pub fn collected_path(&self) -> Option<String> {
        self.resolve(&self.collected)
    }

    pub fn format_or(&self, flag: Option<FormatArg>) -> FormatArg {
        flag.or(self.format).unwrap_or_default()
    }

    pub fn fail_on_warn_or(&self, flag: bool) -> bool {
        flag || self.fail_on_warn.unwrap_or(false)
    }
}

/// Load the explicit config, or `ldsync.toml` when it exists, or defaults.
pub fn load_config(explicit: Option<&str>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) => PathBuf::from(path),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let mut config = Config::parse(&text).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;
    config.base_dir = path.parent().map(Path::to_path_buf);
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

pub fn load_config_or_exit(explicit: Option<&str>) -> Config {
    load_config(explicit).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(2);
    })
}

/// Flag value, else config value, else exit with a usage error.
pub fn require_path_or_exit(
    flag: Option<String>,
    configured: Option<String>,
    name: &str,
) -> String {
    flag.or(configured).unwrap_or_else(|| {
        eprintln!(
            "error: missing --{name} (or `{}` in {DEFAULT_CONFIG_PATH})",
            name.replace('-', "_")
        );
        std::process::exit(2);
    })
}

/// Rulesets named by flag or config. `None` when neither names any.
pub fn resolve_rulesets(flag: Option<String>, config: &Config) -> Option<Vec<RulesetName>> {
    let raw = flag.or_else(|| config.rulesets.as_ref().map(RulesetList::joined))?;
    for entry in unknown_ruleset_names(&raw) {
        warn!(ruleset = entry, "ignoring unknown ruleset");
    }
    Some(parse_ruleset_names(&raw))
}

fn loaded_or_exit<T>(result: Result<T, LoadError>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(2);
    })
}

pub fn load_manifest_or_exit(path: &str) -> Manifest {
    let manifest = loaded_or_exit(ldsync_model::load_manifest(path));
    info!(path, routes = manifest.routes.len(), "loaded manifest");
    manifest
}

pub fn load_collected_or_exit(path: &str) -> CollectedData {
    let collected = loaded_or_exit(ldsync_model::load_collected(path));
    info!(
        path,
        routes = collected.routes.len(),
        nodes = collected.node_count(),
        "loaded collected data"
    );
    collected
}

pub fn load_source_usage_or_exit(path: &str) -> Vec<SourceUsageInfo> {
    let usage = loaded_or_exit(ldsync_model::load_source_usage(path));
    info!(path, entries = usage.len(), "loaded source usage");
    usage
}

pub fn print_json_or_exit<T: Serialize>(value: &T, what: &str) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("error: failed to render {what} payload: {e}");
        std::process::exit(2);
    });
    println!("{rendered}");
}

/// Exit 1 on errors, or on warnings when `fail_on_warn` is set.
pub fn exit_on_verdict(ok: bool, warnings: usize, fail_on_warn: bool) {
    if !ok || (fail_on_warn && warnings > 0) {
        std::process::exit(1);
    }
}
