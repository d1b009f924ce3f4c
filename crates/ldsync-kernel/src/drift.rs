//! Snapshot drift: which routes' collected output changed between builds.
//!
//! Routes are compared by the digest of their canonical node list, so key
//! order inside a node never counts as drift but node order does.

use crate::routes::found_types;
use ldsync_model::{CollectedData, Node, snapshot_digest};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DRIFT_CHECK_KIND: &str = "ldsync.drift.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDrift {
    pub route: String,
    pub before_digest: String,
    pub after_digest: String,
    pub added_types: Vec<String>,
    pub removed_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriftReport {
    pub check_kind: String,
    pub drifted: bool,
    pub before_digest: String,
    pub after_digest: String,
    pub added_routes: Vec<String>,
    pub removed_routes: Vec<String>,
    pub changed_routes: Vec<RouteDrift>,
    pub unchanged_count: usize,
}

fn nodes_value(nodes: &[Node]) -> Value {
    Value::Array(nodes.iter().map(Node::to_value).collect())
}

/// Digest of one route's node list.
pub fn route_digest(nodes: &[Node]) -> String {
    snapshot_digest(&nodes_value(nodes))
}

/// Digest of a whole collected snapshot.
pub fn collected_digest(collected: &CollectedData) -> String {
    let routes: Map<String, Value> = collected
        .routes
        .iter()
        .map(|(route, nodes)| (route.clone(), nodes_value(nodes)))
        .collect();
    let mut root = Map::new();
    root.insert("routes".to_string(), Value::Object(routes));
    snapshot_digest(&Value::Object(root))
}

/// Compare two collected snapshots route by route.
pub fn diff_collected(before: &CollectedData, after: &CollectedData) -> DriftReport {
    let added_routes: Vec<String> = after
        .routes
        .keys()
        .filter(|route| !before.routes.contains_key(*route))
        .cloned()
        .collect();
    let removed_routes: Vec<String> = before
        .routes
        .keys()
        .filter(|route| !after.routes.contains_key(*route))
        .cloned()
        .collect();

    let mut changed_routes = Vec::new();
    let mut unchanged_count = 0;
    for (route, old_nodes) in &before.routes {
        let Some(new_nodes) = after.routes.get(route) else {
            continue;
        };
        let before_digest = route_digest(old_nodes);
        let after_digest = route_digest(new_nodes);
        if before_digest == after_digest {
            unchanged_count += 1;
            continue;
        }

        let old_types = found_types(old_nodes);
        let new_types = found_types(new_nodes);
        changed_routes.push(RouteDrift {
            route: route.clone(),
            before_digest,
            after_digest,
            added_types: new_types
                .iter()
                .filter(|ty| !old_types.contains(ty))
                .cloned()
                .collect(),
            removed_types: old_types
                .iter()
                .filter(|ty| !new_types.contains(ty))
                .cloned()
                .collect(),
        });
    }

    let drifted =
        !(added_routes.is_empty() && removed_routes.is_empty() && changed_routes.is_empty());

    DriftReport {
        check_kind: DRIFT_CHECK_KIND.to_string(),
        drifted,
        before_digest: collected_digest(before),
        after_digest: collected_digest(after),
        added_routes,
        removed_routes,
        changed_routes,
        unchanged_count,
    }
}
