//! # ldsync-kernel
//!
//! Reconciles what a site says about its structured data with what it
//! actually ships.
//!
//! ```text
//!   Manifest ──┐
//!              ├── compute_coverage ────────────► CoverageReport
//! Collected ───┤                                        │ merge_coverage
//!              ├── perform_reality_check ──► RealityCheckReport
//! SourceUsage ─┘         │                              ▲ merge_route_issues
//!                        └ classify_route (ordered table)│
//!                                                 ruleset issues
//! ```
//!
//! Drift compares two collected snapshots by canonical digest. Everything
//! here is pure: inputs are borrowed and never mutated, and the same inputs
//! always produce byte-identical reports.

pub mod coverage;
pub mod drift;
pub mod reality;
pub mod render;
pub mod routes;

pub use coverage::{COVERAGE_CHECK_KIND, CoverageReport, CoverageSummary, compute_coverage};
pub use drift::{DRIFT_CHECK_KIND, DriftReport, RouteDrift, collected_digest, diff_collected};
pub use reality::{
    CLASSIFICATION_RULES, Classification, ClassificationRule, REALITY_CHECK_KIND,
    RealityCheckReport, RealitySummary, RouteFacts, RouteRealityReport, RouteStatus,
    classify_route, merge_coverage, merge_route_issues, perform_reality_check,
};
pub use routes::route_universe;
