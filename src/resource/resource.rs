//! Resource implementation.

use crate::error::{Error, Result};
use crate::resid::{Gvk, ResId};
use crate::smpatch;
use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Annotation keys under this prefix are infrastructure bookkeeping,
/// invisible to patch authors.
const INTERNAL_ANNOTATION_PREFIX: &str = "internal.config.kubernetes.io/";

/// Older bookkeeping keys that predate the internal prefix.
static LEGACY_INTERNAL_ANNOTATIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "config.kubernetes.io/path",
        "config.kubernetes.io/index",
        "config.kubernetes.io/seqindent",
    ]
});

/// Returns true if the annotation key is internal provenance bookkeeping.
pub fn is_internal_annotation(key: &str) -> bool {
    key.starts_with(INTERNAL_ANNOTATION_PREFIX) || LEGACY_INTERNAL_ANNOTATIONS.contains(&key)
}

/// Resource is one manifest document: a JSON object body plus the
/// bookkeeping state the patch applicators maintain.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    body: Value,
    allow_name_change: bool,
    allow_kind_change: bool,
    prev_ids: Vec<ResId>,
}

impl Resource {
    /// Creates a Resource from a JSON value, which must be an object.
    pub fn from_value(body: Value) -> Result<Self> {
        if !body.is_object() {
            return Err(Error::NotAMapping {
                actual: body.to_string(),
            });
        }
        Ok(Resource {
            body,
            allow_name_change: false,
            allow_kind_change: false,
            prev_ids: Vec::new(),
        })
    }

    /// Parses a single YAML document into a Resource.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let body: Value = serde_yaml::from_str(text)?;
        Resource::from_value(body)
    }

    /// Returns a reference to the full structured content.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Returns a mutable reference to the full structured content.
    pub fn body_mut(&mut self) -> &mut Value {
        &mut self.body
    }

    /// Returns the `apiVersion` field, or "" if absent.
    pub fn api_version(&self) -> &str {
        self.body
            .get("apiVersion")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Returns the `kind` field, or "" if absent.
    pub fn kind(&self) -> &str {
        self.body.get("kind").and_then(Value::as_str).unwrap_or("")
    }

    /// Returns `metadata.name`, or "" if absent.
    pub fn name(&self) -> &str {
        self.metadata_str("name")
    }

    /// Returns `metadata.namespace`, or "" if absent.
    pub fn namespace(&self) -> &str {
        self.metadata_str("namespace")
    }

    fn metadata_str(&self, field: &str) -> &str {
        self.body
            .get("metadata")
            .and_then(|m| m.get(field))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Returns the resource's current identity.
    pub fn cur_id(&self) -> ResId {
        ResId::new(
            Gvk::from_api_version_and_kind(self.api_version(), self.kind()),
            self.namespace(),
            self.name(),
        )
    }

    /// Returns the resource's original identity: the identity it had
    /// before any identity-changing mutation, or the current one if it
    /// was never renamed.
    pub fn org_id(&self) -> ResId {
        self.prev_ids.first().cloned().unwrap_or_else(|| self.cur_id())
    }

    /// Records the current identity so downstream consumers can track a
    /// rename performed by a patch.
    pub fn store_previous_id(&mut self) {
        self.prev_ids.push(self.cur_id());
    }

    /// Returns the recorded identity history, oldest first.
    pub fn previous_ids(&self) -> &[ResId] {
        &self.prev_ids
    }

    /// Permits patches applied through this resource to change the
    /// target's `metadata.name`.
    pub fn allow_name_change(&mut self) {
        self.allow_name_change = true;
    }

    /// Permits patches applied through this resource to change the
    /// target's `kind`.
    pub fn allow_kind_change(&mut self) {
        self.allow_kind_change = true;
    }

    /// Returns the string-valued entries of `metadata.labels`.
    pub fn labels(&self) -> BTreeMap<String, String> {
        self.metadata_string_map("labels")
    }

    /// Returns the string-valued entries of `metadata.annotations`.
    pub fn annotations(&self) -> BTreeMap<String, String> {
        self.metadata_string_map("annotations")
    }

    fn metadata_string_map(&self, field: &str) -> BTreeMap<String, String> {
        let mut out = BTreeMap::new();
        if let Some(map) = self
            .body
            .get("metadata")
            .and_then(|m| m.get(field))
            .and_then(Value::as_object)
        {
            for (k, v) in map {
                if let Some(s) = v.as_str() {
                    out.insert(k.clone(), s.to_string());
                }
            }
        }
        out
    }

    /// Takes a point-in-time copy of the internal provenance annotations.
    pub fn internal_annotations(&self) -> BTreeMap<String, String> {
        self.annotations()
            .into_iter()
            .filter(|(k, _)| is_internal_annotation(k))
            .collect()
    }

    /// Re-merges a provenance snapshot into `metadata.annotations`,
    /// overwriting same-keyed entries and leaving everything else a
    /// patch may have added or changed untouched.
    pub fn restore_internal_annotations(&mut self, snapshot: &BTreeMap<String, String>) {
        if snapshot.is_empty() {
            return;
        }
        let Some(root) = self.body.as_object_mut() else {
            return;
        };
        let metadata = root
            .entry("metadata")
            .or_insert_with(|| Value::Object(Map::new()));
        if !metadata.is_object() {
            *metadata = Value::Object(Map::new());
        }
        if let Some(metadata) = metadata.as_object_mut() {
            let annotations = metadata
                .entry("annotations")
                .or_insert_with(|| Value::Object(Map::new()));
            if !annotations.is_object() {
                *annotations = Value::Object(Map::new());
            }
            if let Some(annotations) = annotations.as_object_mut() {
                for (k, v) in snapshot {
                    annotations.insert(k.clone(), Value::String(v.clone()));
                }
            }
        }
    }

    /// Merges a strategic-merge patch entry into this resource in place.
    ///
    /// A patch that would change the name or kind is rejected unless the
    /// corresponding permissive flag was set on the patch entry.
    pub fn apply_sm_patch(&mut self, patch: &Resource) -> Result<()> {
        let changes_name = !patch.name().is_empty() && patch.name() != self.name();
        let changes_kind = !patch.kind().is_empty() && patch.kind() != self.kind();
        if changes_name && !patch.allow_name_change {
            return Err(Error::merge(
                patch.cur_id().to_string(),
                self.cur_id().to_string(),
                "patch changes the resource name; set the allowNameChange option to permit this",
            ));
        }
        if changes_kind && !patch.allow_kind_change {
            return Err(Error::merge(
                patch.cur_id().to_string(),
                self.cur_id().to_string(),
                "patch changes the resource kind; set the allowKindChange option to permit this",
            ));
        }
        if changes_name || changes_kind {
            self.store_previous_id();
        }
        smpatch::merge(&mut self.body, patch.body());
        Ok(())
    }
}
