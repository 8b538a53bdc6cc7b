//! Resource identity: group/version/kind plus namespace and name.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gvk identifies a resource type by group, version and kind.
///
/// Any field may be empty; an empty field acts as a wildcard when the
/// Gvk is used as a match pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Gvk {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl Gvk {
    /// Creates a new Gvk.
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Gvk {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Splits an `apiVersion` string (`group/version` or bare `version`)
    /// and pairs it with a kind.
    pub fn from_api_version_and_kind(api_version: &str, kind: &str) -> Self {
        match api_version.split_once('/') {
            Some((group, version)) => Gvk::new(group, version, kind),
            None => Gvk::new("", api_version, kind),
        }
    }

    /// Rebuilds the `apiVersion` string.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Returns true if all fields are empty.
    pub fn is_empty(&self) -> bool {
        self.group.is_empty() && self.version.is_empty() && self.kind.is_empty()
    }

    /// Returns true if `other` is selected by this Gvk, treating empty
    /// fields of `self` as wildcards.
    pub fn is_selected(&self, other: &Gvk) -> bool {
        (self.group.is_empty() || self.group == other.group)
            && (self.version.is_empty() || self.version == other.version)
            && (self.kind.is_empty() || self.kind == other.kind)
    }
}

impl fmt::Display for Gvk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_version = self.api_version();
        if api_version.is_empty() {
            write!(f, "{}", self.kind)
        } else if self.kind.is_empty() {
            write!(f, "{}", api_version)
        } else {
            write!(f, "{}/{}", api_version, self.kind)
        }
    }
}

/// ResId is the stable identity of one resource in a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ResId {
    #[serde(flatten)]
    pub gvk: Gvk,
    pub name: String,
    pub namespace: String,
}

impl ResId {
    /// Creates a new ResId.
    pub fn new(gvk: Gvk, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        ResId {
            gvk,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Returns true if `other` is identified by this id.
    ///
    /// Kind and name are exact; empty group, version or namespace on
    /// `self` match anything, so a patch carrying only `kind` and `name`
    /// still finds its target.
    pub fn is_selected(&self, other: &ResId) -> bool {
        self.gvk.is_selected(&other.gvk)
            && self.name == other.name
            && (self.namespace.is_empty() || self.namespace == other.namespace)
    }
}

impl fmt::Display for ResId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gvk)?;
        if !self.namespace.is_empty() {
            write!(f, "/{}", self.namespace)?;
        }
        if !self.name.is_empty() {
            write!(f, "/{}", self.name)?;
        }
        Ok(())
    }
}
