//! Strategic-merge implementation over JSON values.

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

/// Candidate merge keys for associative list merge, in priority order.
/// Without a schema there is no per-field patchMergeKey, so the
/// conventional keys of container, env, port and volume lists are tried.
static MERGE_KEYS: Lazy<Vec<&'static str>> =
    Lazy::new(|| vec!["name", "key", "mountPath", "containerPort"]);

/// Merges `patch` into `target` in place with strategic-merge semantics:
/// null patch fields delete, maps merge recursively, lists merge by key
/// or positionally, anything else replaces.
pub fn merge(target: &mut Value, patch: &Value) {
    match patch {
        Value::Null => {}
        Value::Object(patch_map) => {
            if let Value::Object(target_map) = target {
                merge_maps(target_map, patch_map);
            } else {
                *target = Value::Object(strip_nulls(patch_map));
            }
        }
        Value::Array(patch_list) => {
            if let Value::Array(target_list) = target {
                let merged = merge_lists(target_list, patch_list);
                *target = Value::Array(merged);
            } else {
                *target = patch.clone();
            }
        }
        _ => *target = patch.clone(),
    }
}

fn merge_maps(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, patch_value) in patch {
        if patch_value.is_null() {
            target.remove(key);
            continue;
        }
        match target.get_mut(key) {
            Some(target_value) => merge(target_value, patch_value),
            None => {
                target.insert(key.clone(), patch_value.clone());
            }
        }
    }
}

/// When a patch replaces a non-map with a map, the nulls inside it are
/// deletion markers with nothing to delete and must not survive.
fn strip_nulls(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Object(inner) => {
                out.insert(key.clone(), Value::Object(strip_nulls(inner)));
            }
            other => {
                out.insert(key.clone(), other.clone());
            }
        }
    }
    out
}

fn merge_lists(target: &[Value], patch: &[Value]) -> Vec<Value> {
    match merge_key_for(target, patch) {
        Some(key) => merge_lists_by_key(target, patch, key),
        None => merge_lists_positionally(target, patch),
    }
}

/// Picks a merge key present as a string in every object element of both
/// lists, or None when the lists must merge positionally.
fn merge_key_for(target: &[Value], patch: &[Value]) -> Option<&'static str> {
    if target.is_empty() || patch.is_empty() {
        return None;
    }
    MERGE_KEYS.iter().copied().find(|key| {
        target
            .iter()
            .chain(patch.iter())
            .all(|e| e.get(key).map(Value::is_string).unwrap_or(false))
    })
}

fn merge_lists_by_key(target: &[Value], patch: &[Value], key: &str) -> Vec<Value> {
    let mut out: Vec<Value> = target.to_vec();
    for patch_elem in patch {
        let patch_key = patch_elem.get(key);
        match out.iter_mut().find(|e| e.get(key) == patch_key) {
            Some(target_elem) => merge(target_elem, patch_elem),
            None => out.push(patch_elem.clone()),
        }
    }
    out
}

fn merge_lists_positionally(target: &[Value], patch: &[Value]) -> Vec<Value> {
    let mut out = Vec::with_capacity(target.len().max(patch.len()));
    for (i, patch_elem) in patch.iter().enumerate() {
        match target.get(i) {
            Some(target_elem) => {
                let mut merged = target_elem.clone();
                merge(&mut merged, patch_elem);
                out.push(merged);
            }
            None => out.push(patch_elem.clone()),
        }
    }
    if target.len() > patch.len() {
        out.extend_from_slice(&target[patch.len()..]);
    }
    out
}
