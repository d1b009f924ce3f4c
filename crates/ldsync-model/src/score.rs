//! Penalty scoring.
//!
//! A score starts at a cap and loses a fixed amount per issue. Aggregates are
//! unweighted means over the scored items, rounded half-up.

use crate::issue::{IssueCounts, ValidationIssue};

pub const MAX_SCORE: u32 = 100;
pub const ERROR_PENALTY: u32 = 10;
pub const WARNING_PENALTY: u32 = 2;

/// `cap - 10 * errors - 2 * warnings`, clamped to `0..=cap`.
pub fn score_from_counts(cap: u32, counts: IssueCounts) -> u32 {
    let penalty = (counts.errors as u64) * ERROR_PENALTY as u64
        + (counts.warnings as u64) * WARNING_PENALTY as u64;
    (cap as u64).saturating_sub(penalty) as u32
}

/// Score an issue list against the standard cap.
pub fn score_issues(issues: &[ValidationIssue]) -> u32 {
    score_from_counts(MAX_SCORE, IssueCounts::of(issues))
}

/// Mean of `scores`, rounded half-up. An empty set scores [`MAX_SCORE`].
pub fn aggregate_score(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return MAX_SCORE;
    }
    let n = scores.len() as u64;
    let sum: u64 = scores.iter().map(|s| *s as u64).sum();
    ((2 * sum + n) / (2 * n)) as u32
}
