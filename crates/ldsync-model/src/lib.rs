//! # ldsync-model
//!
//! Data types shared by every ldsync crate:
//!
//! - `TypeName`: the closed structured-data vocabulary
//! - `Node`: one JSON-LD object with absent-tolerant field access
//! - `Manifest`, `CollectedData`, `SourceUsageInfo`: the three input snapshots
//! - `ValidationIssue`: the value every check produces
//! - canonical serialization and digests for snapshot comparison
//! - penalty scoring shared by every report

pub mod canonical;
pub mod error;
pub mod issue;
pub mod load;
pub mod node;
pub mod score;
pub mod snapshot;
pub mod type_name;

pub use canonical::{snapshot_digest, stable_stringify, stable_stringify_serialize};
pub use error::LoadError;
pub use issue::{IssueCounts, Severity, ValidationIssue};
pub use load::{
    load_collected, load_manifest, load_source_usage, parse_collected, parse_manifest,
    parse_source_usage,
};
pub use node::{CONTEXT_KEY, Node, TYPE_KEY, is_present};
pub use score::{MAX_SCORE, aggregate_score, score_from_counts, score_issues};
pub use snapshot::{CollectedData, Manifest, SourceUsageInfo};
pub use type_name::TypeName;
