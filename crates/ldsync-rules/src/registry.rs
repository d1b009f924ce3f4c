//! Named ruleset registry and dispatch.
//!
//! Rulesets are immutable `const` tables. Dispatch walks the node list in
//! order, looks up each node's primary type, and runs that type's checks.
//! Types a ruleset does not mention are skipped.

use crate::ai_citation::AI_CITATION;
use crate::check::{Check, node_path, run_checks};
use crate::google::GOOGLE;
use ldsync_model::{IssueCounts, Node, TypeName, ValidationIssue, score_from_counts};
use serde::{Deserialize, Serialize};

/// A named table of per-type checks.
#[derive(Debug, Clone, Copy)]
pub struct Ruleset {
    pub name: &'static str,
    pub description: &'static str,
    pub base_score: u32,
    pub table: &'static [(TypeName, &'static [Check])],
}

impl Ruleset {
    pub fn checks_for(&self, ty: TypeName) -> Option<&'static [Check]> {
        self.table
            .iter()
            .find_map(|(entry, checks)| (*entry == ty).then_some(*checks))
    }

    pub fn covered_types(&self) -> Vec<TypeName> {
        self.table.iter().map(|(ty, _)| *ty).collect()
    }

    /// Issues for every node, in node order then check order.
    pub fn evaluate(&self, nodes: &[Node]) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        for (index, node) in nodes.iter().enumerate() {
            let Some(ty) = node.primary_type() else {
                continue;
            };
            let Some(checks) = self.checks_for(ty) else {
                continue;
            };
            issues.extend(run_checks(self.name, ty, checks, node, &node_path(index)));
        }
        issues
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RulesetName {
    #[serde(rename = "google")]
    Google,
    #[serde(rename = "ai-citation")]
    AiCitation,
}

impl RulesetName {
    pub const ALL: [RulesetName; 2] = [Self::Google, Self::AiCitation];

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    pub fn as_str(self) -> &'static str {
        self.ruleset().name
    }

    pub fn ruleset(self) -> &'static Ruleset {
        match self {
            Self::Google => &GOOGLE,
            Self::AiCitation => &AI_CITATION,
        }
    }
}

impl std::fmt::Display for RulesetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a comma-separated list of ruleset names.
///
/// Unrecognized and empty entries are dropped; duplicates keep their first
/// position.
pub fn parse_ruleset_names(raw: &str) -> Vec<RulesetName> {
    let mut out = Vec::new();
    for name in raw.split(',').filter_map(RulesetName::parse) {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// Non-empty entries of a comma-separated list that name no known ruleset.
pub fn unknown_ruleset_names(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && RulesetName::parse(entry).is_none())
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesetSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl From<IssueCounts> for RulesetSummary {
    fn from(counts: IssueCounts) -> Self {
        Self {
            errors: counts.errors,
            warnings: counts.warnings,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulesetResult {
    pub rulesets: Vec<RulesetName>,
    pub ok: bool,
    pub issues: Vec<ValidationIssue>,
    pub summary: RulesetSummary,
    pub score: u32,
}

impl RulesetResult {
    fn from_issues(
        rulesets: Vec<RulesetName>,
        base_score: u32,
        issues: Vec<ValidationIssue>,
    ) -> Self {
        let counts = IssueCounts::of(&issues);
        Self {
            rulesets,
            ok: counts.errors == 0,
            issues,
            summary: counts.into(),
            score: score_from_counts(base_score, counts),
        }
    }
}

pub fn run_ruleset(name: RulesetName, nodes: &[Node]) -> RulesetResult {
    let ruleset = name.ruleset();
    RulesetResult::from_issues(vec![name], ruleset.base_score, ruleset.evaluate(nodes))
}

/// Run several rulesets and concatenate their results in the given order.
///
/// Issues are not deduplicated across rulesets: two rulesets flagging the
/// same node are independent findings.
pub fn run_multiple_rulesets(names: &[RulesetName], nodes: &[Node]) -> RulesetResult {
    let mut issues = Vec::new();
    let mut base_score = ldsync_model::MAX_SCORE;
    for name in names {
        let ruleset = name.ruleset();
        base_score = base_score.min(ruleset.base_score);
        issues.extend(ruleset.evaluate(nodes));
    }
    RulesetResult::from_issues(names.to_vec(), base_score, issues)
}
