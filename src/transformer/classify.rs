//! Format classification: strategic-merge versus JSON-Patch.
//!
//! The same raw text is run through two independent pure parses; a
//! single decision function disambiguates the outcomes.

use crate::error::{Error, Result};
use crate::resmap::ResMap;
use crate::resource::Resource;
use json_patch::Patch;

/// ResolvedPatch is the classification outcome. Exactly one grammar
/// applies; the sum type makes the invariant structural.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedPatch {
    /// An ordered set of partial documents, each carrying its own
    /// identity.
    StrategicMerge(Vec<Resource>),
    /// An ordered RFC 6902 operation list.
    Json(Patch),
}

/// Classifies raw patch text into a [`ResolvedPatch`].
///
/// The source label goes into every classification error so failures
/// can be traced back to the configured patch without re-running.
pub fn classify(text: &str, source_label: &str) -> Result<ResolvedPatch> {
    decide(
        parse_strategic_merge(text),
        parse_json_ops(text),
        source_label,
    )
}

/// Parses the text as a stream of strategic-merge documents. An empty
/// stream parses successfully to zero entries.
pub fn parse_strategic_merge(text: &str) -> Result<Vec<Resource>> {
    Ok(ResMap::from_yaml(text)?.into_resources())
}

/// Parses the text as an RFC 6902 operation list. Text not beginning
/// with `[` is transcoded from YAML first, so operation lists may be
/// authored in either encoding. An empty string is an error, not an
/// empty list.
pub fn parse_json_ops(text: &str) -> Result<Patch> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyPatch);
    }
    if trimmed.starts_with('[') {
        Ok(serde_json::from_str(trimmed)?)
    } else {
        let transcoded: serde_json::Value = serde_yaml::from_str(trimmed)?;
        Ok(serde_json::from_value(transcoded)?)
    }
}

/// The disambiguation rule, in order:
/// ambiguous when both parses succeed with at least one element each,
/// unparseable when both fail, otherwise the surviving parse wins.
/// A parse succeeding with zero elements never creates ambiguity.
pub(crate) fn decide(
    sm: Result<Vec<Resource>>,
    ops: Result<Patch>,
    source_label: &str,
) -> Result<ResolvedPatch> {
    match (sm, ops) {
        (Ok(sm), Ok(ops)) if !sm.is_empty() && !ops.0.is_empty() => Err(Error::AmbiguousPatch {
            source_label: source_label.to_string(),
        }),
        (Ok(sm), _) => Ok(ResolvedPatch::StrategicMerge(sm)),
        (Err(_), Ok(ops)) => Ok(ResolvedPatch::Json(ops)),
        (Err(_), Err(_)) => Err(Error::UnparseablePatch {
            source_label: source_label.to_string(),
        }),
    }
}
