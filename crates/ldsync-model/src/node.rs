//! Structured-data nodes.
//!
//! A node is one JSON-LD object. Field access never fails: a missing field,
//! a null, an empty string, or a value of the wrong shape all read as absent.

use crate::type_name::TypeName;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const TYPE_KEY: &str = "@type";
pub const CONTEXT_KEY: &str = "@context";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(Map<String, Value>);

impl Node {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Wrap a JSON value; only objects are nodes.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Every non-empty string in `@type`, which may be a string or a list.
    pub fn declared_types(&self) -> Vec<&str> {
        match self.0.get(TYPE_KEY) {
            Some(Value::String(ty)) if !ty.trim().is_empty() => vec![ty.as_str()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|ty| !ty.trim().is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// First recognized entry of `@type`.
    pub fn primary_type(&self) -> Option<TypeName> {
        self.declared_types().into_iter().find_map(TypeName::parse)
    }

    pub fn has_context(&self) -> bool {
        self.0.get(CONTEXT_KEY).is_some_and(is_present)
    }

    /// Resolve a dotted path such as `offers.price`.
    ///
    /// Lists met along the way are searched element by element and the first
    /// present match wins.
    pub fn lookup(&self, path: &str) -> Option<&Value> {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        let (first, rest) = segments.split_first()?;
        let value = self.0.get(*first)?;
        lookup_value(value, rest)
    }

    pub fn has(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(Value::as_str).map(str::trim)
    }

    /// Items of a list field. A single object is treated as a one-item list.
    pub fn items(&self, path: &str) -> Vec<&Value> {
        match self.lookup(path) {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(value @ Value::Object(_)) => vec![value],
            _ => Vec::new(),
        }
    }
}

impl From<Map<String, Value>> for Node {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Whether a value counts as provided.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Dotted-path lookup on an arbitrary value, with the same list semantics as
/// [`Node::lookup`].
pub fn lookup_value<'a>(value: &'a Value, segments: &[&str]) -> Option<&'a Value> {
    if let Value::Array(items) = value
        && !segments.is_empty()
    {
        return items.iter().find_map(|item| lookup_value(item, segments));
    }
    match segments.split_first() {
        None => is_present(value).then_some(value),
        Some((head, rest)) => match value {
            Value::Object(fields) => lookup_value(fields.get(*head)?, rest),
            _ => None,
        },
    }
}
