//! Property tests for the canonical digest.

use proptest::prelude::*;
use serde_json::{json, Value};

use warden_audit::artifacts::{canonical_digest, canonicalize};

#[test]
fn canonical_form_sorts_keys_recursively() {
    let value = json!({"z": {"b": 1, "a": 2}, "a": 3});
    let canonical = canonicalize(&value);
    let serialized = canonical.to_string();
    // BTreeMap-backed maps serialize in sorted key order.
    assert!(serialized.find("\"a\"").unwrap() < serialized.find("\"z\"").unwrap());
}

#[test]
fn mixed_list_without_ids_is_left_in_order() {
    let value = json!([{"id": "a"}, {"name": "no-id"}]);
    let canonical = canonicalize(&value);
    // One element lacks an id, so the list keeps its order.
    assert_eq!(canonical[0]["id"], json!("a"));
}

proptest! {
    /// Digest is invariant under reordering of a dict-list whose elements
    /// carry an `id` field.
    #[test]
    fn digest_invariant_under_dict_list_reordering(
        mut entries in proptest::collection::vec(("[a-z]{1,8}", 0i64..1000), 1..12)
    ) {
        entries.sort();
        entries.dedup_by(|a, b| a.0 == b.0);

        let forward: Vec<Value> = entries
            .iter()
            .map(|(id, value)| json!({"id": id, "value": value}))
            .collect();
        let mut reversed = forward.clone();
        reversed.reverse();

        prop_assert_eq!(
            canonical_digest(&Value::Array(forward)),
            canonical_digest(&Value::Array(reversed))
        );
    }

    /// Digest is deterministic for arbitrary key order in maps.
    #[test]
    fn digest_deterministic_for_same_content(
        keys in proptest::collection::btree_set("[a-z]{1,6}", 1..8)
    ) {
        let forward: serde_json::Map<String, Value> = keys
            .iter()
            .map(|k| (k.clone(), json!(k.len())))
            .collect();
        let backward: serde_json::Map<String, Value> = keys
            .iter()
            .rev()
            .map(|k| (k.clone(), json!(k.len())))
            .collect();

        prop_assert_eq!(
            canonical_digest(&Value::Object(forward)),
            canonical_digest(&Value::Object(backward))
        );
    }
}
