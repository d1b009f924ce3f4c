//! The three input snapshots: manifest, source usage, collected output.

use crate::node::Node;
use crate::type_name::TypeName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared expectations: route pattern -> expected types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub routes: BTreeMap<String, Vec<TypeName>>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: impl Into<String>, types: Vec<TypeName>) -> Self {
        self.routes.insert(route.into(), types);
        self
    }

    /// `None` when the route has no entry; `Some(&[])` when listed empty.
    pub fn entry(&self, route: &str) -> Option<&[TypeName]> {
        self.routes.get(route).map(Vec::as_slice)
    }

    pub fn expected(&self, route: &str) -> &[TypeName] {
        self.entry(route).unwrap_or(&[])
    }
}

/// Rendered output: route -> nodes found in the built page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectedData {
    #[serde(default)]
    pub routes: BTreeMap<String, Vec<Node>>,
}

impl CollectedData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: impl Into<String>, nodes: Vec<Node>) -> Self {
        self.routes.insert(route.into(), nodes);
        self
    }

    pub fn nodes(&self, route: &str) -> &[Node] {
        self.routes.get(route).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }
}

/// Source-scan result for one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceUsageInfo {
    pub route: String,
    #[serde(default)]
    pub has_import: bool,
    #[serde(default)]
    pub has_usage: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl SourceUsageInfo {
    pub fn new(route: impl Into<String>, has_import: bool, has_usage: bool) -> Self {
        Self {
            route: route.into(),
            has_import,
            has_usage,
            file: None,
        }
    }

    /// The component is both imported and rendered.
    pub fn has_working_component(&self) -> bool {
        self.has_import && self.has_usage
    }
}
