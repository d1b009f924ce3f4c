//! Canonical serialization for snapshot comparison.
//!
//! Object keys are sorted recursively, arrays keep their order, and no
//! insignificant whitespace is emitted. Two snapshots are the same exactly
//! when their canonical bytes are equal.

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

pub const DIGEST_PREFIX: &str = "sha256:";

/// Canonical string form of a JSON value.
pub fn stable_stringify(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Canonical string form of any serializable value.
pub fn stable_stringify_serialize<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(stable_stringify(&serde_json::to_value(value)?))
}

/// `sha256:<hex>` over the canonical bytes.
pub fn snapshot_digest(value: &Value) -> String {
    let hash = Sha256::digest(stable_stringify(value).as_bytes());
    let mut out = String::with_capacity(DIGEST_PREFIX.len() + hash.len() * 2);
    out.push_str(DIGEST_PREFIX);
    for byte in hash {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
    }
}

fn write_string(s: &str, out: &mut String) {
    // Serializing a str cannot fail.
    out.push_str(&Value::String(s.to_string()).to_string());
}
