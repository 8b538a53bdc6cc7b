//! PatchTransformer implementation.

use crate::error::{Error, Result};
use crate::resmap::ResMap;
use crate::resource::Resource;
use crate::selector::Selector;
use serde::Deserialize;
use std::collections::BTreeMap;

use super::classify::{classify, ResolvedPatch};
use super::loader::Loader;

/// Per-entry permissive option: the patch may change `metadata.name`.
pub const OPTION_ALLOW_NAME_CHANGE: &str = "allowNameChange";
/// Per-entry permissive option: the patch may change `kind`.
pub const OPTION_ALLOW_KIND_CHANGE: &str = "allowKindChange";

/// Raw configuration for one patch operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
struct PatchConfig {
    /// Path to patch content, resolved through the loader.
    /// Mutually exclusive with `patch`.
    path: String,
    /// Inline patch text. Mutually exclusive with `path`.
    patch: String,
    /// Which resources to patch. Required for JSON patches; optional
    /// for a single strategic-merge patch.
    target: Option<Selector>,
    options: BTreeMap<String, bool>,
}

/// PatchTransformer applies one configured patch operation to a
/// resource collection.
///
/// Construction via [`PatchTransformer::configure`] resolves the patch
/// source and classifies the text; [`PatchTransformer::transform`]
/// mutates matched resources in place, in collection order, stopping at
/// the first failure without rolling back prior mutations.
#[derive(Debug)]
pub struct PatchTransformer {
    resolved: ResolvedPatch,
    /// Human-readable provenance label, `[patch: ...]` or `[path: ...]`,
    /// carried into every later error message.
    patch_source: String,
    target: Option<Selector>,
}

impl PatchTransformer {
    /// Parses configuration bytes, resolves the patch source through the
    /// loader and classifies the patch text.
    pub fn configure(loader: &dyn Loader, config: &[u8]) -> Result<Self> {
        let cfg: PatchConfig = serde_yaml::from_slice(config)?;
        let inline = cfg.patch.trim();

        let (patch_text, patch_source) = match (inline.is_empty(), cfg.path.is_empty()) {
            (true, true) => {
                return Err(Error::configuration(format!(
                    "must specify one of patch and path in\n{}",
                    String::from_utf8_lossy(config)
                )))
            }
            (false, false) => {
                return Err(Error::configuration(format!(
                    "patch and path can't be set at the same time\n{}",
                    String::from_utf8_lossy(config)
                )))
            }
            (false, true) => (inline.to_string(), format!("[patch: {:?}]", inline)),
            (true, false) => {
                let loaded = loader.load(&cfg.path).map_err(|source| Error::Load {
                    path: cfg.path.clone(),
                    source,
                })?;
                (loaded, format!("[path: {:?}]", cfg.path))
            }
        };

        let mut resolved = classify(&patch_text, &patch_source)?;
        if let ResolvedPatch::StrategicMerge(patches) = &mut resolved {
            for patch in patches.iter_mut() {
                if option_set(&cfg.options, OPTION_ALLOW_NAME_CHANGE) {
                    patch.allow_name_change();
                }
                if option_set(&cfg.options, OPTION_ALLOW_KIND_CHANGE) {
                    patch.allow_kind_change();
                }
            }
        }

        Ok(PatchTransformer {
            resolved,
            patch_source,
            target: cfg.target,
        })
    }

    /// Returns the provenance label of the configured patch.
    pub fn patch_source(&self) -> &str {
        &self.patch_source
    }

    /// Returns the classified patch.
    pub fn resolved(&self) -> &ResolvedPatch {
        &self.resolved
    }

    /// Applies the classified patch to the collection.
    pub fn transform(&self, m: &mut ResMap) -> Result<()> {
        match &self.resolved {
            ResolvedPatch::StrategicMerge(patches) => self.transform_strategic_merge(m, patches),
            ResolvedPatch::Json(ops) => self.transform_json(m, ops),
        }
    }

    /// Applies each strategic-merge patch to the resource matching its
    /// own identity, or a single patch to every resource matching the
    /// explicit target selector.
    fn transform_strategic_merge(&self, m: &mut ResMap, patches: &[Resource]) -> Result<()> {
        if let Some(target) = &self.target {
            // A single selector cannot be divided across patch bodies.
            if patches.len() > 1 {
                return Err(Error::MultiplePatchesWithTarget {
                    source_label: self.patch_source.clone(),
                });
            }
            let Some(patch) = patches.first() else {
                return Ok(());
            };
            let selected = m.select(target)?;
            if selected.is_empty() {
                return Err(Error::no_match(format!(
                    "patch target {} in the resource collection",
                    target
                )));
            }
            for index in selected {
                if let Some(resource) = m.get_mut(index) {
                    resource.apply_sm_patch(patch)?;
                }
            }
            return Ok(());
        }

        for patch in patches {
            let id = patch.org_id();
            let index = m
                .get_by_id(&id)
                .ok_or_else(|| Error::no_match(format!("strategic merge patch {}", id)))?;
            if let Some(resource) = m.get_mut(index) {
                resource.apply_sm_patch(patch)?;
            }
        }
        Ok(())
    }

    /// Applies the operation list to every resource matching the target
    /// selector, defending internal provenance annotations against
    /// operations that rewrite the annotation map.
    fn transform_json(&self, m: &mut ResMap, ops: &json_patch::Patch) -> Result<()> {
        let target = self.target.as_ref().ok_or_else(|| {
            Error::configuration(format!(
                "must specify a target for JSON patch {}",
                self.patch_source
            ))
        })?;
        for index in m.select(target)? {
            let Some(resource) = m.get_mut(index) else {
                continue;
            };
            resource.store_previous_id();
            let snapshot = resource.internal_annotations();
            let target_id = resource.cur_id();
            json_patch::patch(resource.body_mut(), ops).map_err(|source| {
                Error::OperationApply {
                    target_id: target_id.to_string(),
                    source,
                }
            })?;
            resource.restore_internal_annotations(&snapshot);
        }
        Ok(())
    }
}

fn option_set(options: &BTreeMap<String, bool>, name: &str) -> bool {
    options.get(name).copied().unwrap_or(false)
}
