pub mod check;
pub mod coverage;
pub mod drift;
pub mod lint;
pub mod rulesets;
