//! Canonical digest facility.
//!
//! Canonical form: every mapping's keys sorted recursively; a list whose
//! elements are all mappings carrying a string `id` is sorted by that id
//! before hashing. The canonical form is serialized deterministically and
//! hashed with SHA-256.
//!
//! The digest is stored beside any exported record set. A consumer MUST
//! recompute and compare it before a destructive replace; a mismatch
//! aborts the replace before any mutation.

use serde_json::Value;
use sha2::{Digest, Sha256};

/// Recursively canonicalize a JSON value.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            // serde_json maps iterate in sorted key order; rebuilding the
            // map after canonicalizing the values keeps that order.
            let mut sorted = serde_json::Map::new();
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(child) = map.get(key) {
                    sorted.insert(key.clone(), canonicalize(child));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(items) => {
            let mut canonical: Vec<Value> = items.iter().map(canonicalize).collect();
            let all_have_ids = !canonical.is_empty()
                && canonical
                    .iter()
                    .all(|v| v.get("id").and_then(Value::as_str).is_some());
            if all_have_ids {
                canonical.sort_by(|a, b| {
                    let a_id = a.get("id").and_then(Value::as_str).unwrap_or("");
                    let b_id = b.get("id").and_then(Value::as_str).unwrap_or("");
                    a_id.cmp(b_id)
                });
            }
            Value::Array(canonical)
        }
        other => other.clone(),
    }
}

/// SHA-256 over the canonical serialization, hex-encoded with an
/// algorithm prefix.
pub fn canonical_digest(value: &Value) -> String {
    let canonical = canonicalize(value);
    let serialized = canonical.to_string();
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    let digest = hasher.finalize();
    format!("sha256:{}", hex_encode(&digest))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn digest_is_deterministic() {
        let value = json!({"b": 1, "a": [1, 2, 3]});
        assert_eq!(canonical_digest(&value), canonical_digest(&value));
    }

    #[test]
    fn digest_ignores_dict_list_order_when_ids_present() {
        let forward = json!([
            {"id": "a", "value": 1},
            {"id": "b", "value": 2},
        ]);
        let reversed = json!([
            {"id": "b", "value": 2},
            {"id": "a", "value": 1},
        ]);
        assert_eq!(canonical_digest(&forward), canonical_digest(&reversed));
    }

    #[test]
    fn plain_list_order_still_matters() {
        let forward = json!([1, 2, 3]);
        let reversed = json!([3, 2, 1]);
        assert_ne!(canonical_digest(&forward), canonical_digest(&reversed));
    }

    #[test]
    fn content_change_changes_digest() {
        let a = json!({"id": "a", "value": 1});
        let b = json!({"id": "a", "value": 2});
        assert_ne!(canonical_digest(&a), canonical_digest(&b));
    }
}
