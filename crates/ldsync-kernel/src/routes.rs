//! Route-level helpers shared by the coverage and reality engines.

use ldsync_model::{Node, TypeName, ValidationIssue};
use std::collections::BTreeSet;

/// Union of route sets, deduplicated and sorted by byte order.
pub fn route_universe<'a, I, R>(sources: I) -> Vec<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = &'a str>,
{
    sources
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Every declared `@type` across `nodes`, first occurrence order.
pub fn found_types(nodes: &[Node]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for ty in nodes.iter().flat_map(Node::declared_types) {
        if !out.iter().any(|seen| seen == ty) {
            out.push(ty.to_string());
        }
    }
    out
}

/// Expected types with no matching `@type` among `found`, in expected order.
pub fn missing_types(expected: &[TypeName], found: &[String]) -> Vec<TypeName> {
    let mut out = Vec::new();
    for ty in expected {
        if !found.iter().any(|f| f == ty.as_str()) && !out.contains(ty) {
            out.push(*ty);
        }
    }
    out
}

/// The issue for a route that renders structured data nobody declared.
///
/// Coverage and reality checks decide "undeclared" differently but report
/// it the same way, always as a warning.
pub fn unlisted_route_issue(rule_id: &str, route: &str) -> ValidationIssue {
    ValidationIssue::warn(
        rule_id,
        route,
        format!("route {route} outputs structured data but is not listed in the manifest"),
    )
}

pub fn join_types(types: &[TypeName]) -> String {
    types
        .iter()
        .map(|ty| ty.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
