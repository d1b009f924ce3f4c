//! # ldsync-rules
//!
//! Rulesets lint structured-data nodes for per-type field completeness.
//!
//! ```text
//! Check                 ← one field-presence/shape test, total over any node
//!     │
//! Ruleset               ← const table: TypeName → ordered &[Check]
//!     │
//! run_ruleset           ← dispatch by primary @type, issues in node order
//! ```
//!
//! Two named rulesets ship: `google` (rich-results eligibility) and
//! `ai-citation` (attribution for answer engines). `validate_nodes` is the
//! base presence check every route's output passes through.

pub mod ai_citation;
pub mod base;
pub mod check;
pub mod google;
pub mod registry;

pub use base::validate_nodes;
pub use check::Check;
pub use registry::{
    Ruleset, RulesetName, RulesetResult, RulesetSummary, parse_ruleset_names,
    run_multiple_rulesets, run_ruleset, unknown_ruleset_names,
};
