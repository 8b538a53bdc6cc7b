//! Selector - a query describing which resources a patch targets.

use crate::error::{Error, Result};
use crate::resid::Gvk;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Selector matches resources by identity fields and by label or
/// annotation requirements. Empty identity fields are wildcards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct Selector {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub namespace: String,
    pub name: String,
    /// Requirements of the form `key=value[,key=value...]`, all of which
    /// must hold on `metadata.labels`.
    pub label_selector: String,
    /// Same syntax as `label_selector`, matched against
    /// `metadata.annotations`.
    pub annotation_selector: String,
}

impl Selector {
    /// Returns true if the resource's current identity and metadata
    /// satisfy every populated field of the selector.
    ///
    /// Fails when a label or annotation requirement string is malformed;
    /// identity fields cannot fail.
    pub fn matches(&self, resource: &Resource) -> Result<bool> {
        let id = resource.cur_id();
        let gvk_pattern = Gvk::new(&*self.group, &*self.version, &*self.kind);
        if !gvk_pattern.is_selected(&id.gvk) {
            return Ok(false);
        }
        if !self.namespace.is_empty() && self.namespace != id.namespace {
            return Ok(false);
        }
        if !self.name.is_empty() && self.name != id.name {
            return Ok(false);
        }
        if !requirements_hold(&self.label_selector, &resource.labels())? {
            return Ok(false);
        }
        if !requirements_hold(&self.annotation_selector, &resource.annotations())? {
            return Ok(false);
        }
        Ok(true)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        for (label, value) in [
            ("group", &self.group),
            ("version", &self.version),
            ("kind", &self.kind),
            ("namespace", &self.namespace),
            ("name", &self.name),
            ("labelSelector", &self.label_selector),
            ("annotationSelector", &self.annotation_selector),
        ] {
            if !value.is_empty() {
                parts.push(format!("{}={}", label, value));
            }
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Checks that every `key=value` requirement holds in the given map.
/// An empty requirement string holds trivially.
fn requirements_hold(requirements: &str, map: &BTreeMap<String, String>) -> Result<bool> {
    for requirement in requirements
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
    {
        let (key, value) =
            requirement
                .split_once('=')
                .ok_or_else(|| Error::MalformedSelector {
                    requirement: requirement.to_string(),
                    message: "expected key=value".to_string(),
                })?;
        if map.get(key.trim()).map(String::as_str) != Some(value.trim()) {
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_deployment() -> Resource {
        Resource::from_yaml(
            r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: web
  namespace: prod
  labels:
    app: web
    tier: frontend
  annotations:
    team: platform
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_selector_matches_everything() {
        assert!(Selector::default().matches(&web_deployment()).unwrap());
    }

    #[test]
    fn test_identity_fields() {
        let r = web_deployment();

        let mut s = Selector::default();
        s.kind = "Deployment".to_string();
        assert!(s.matches(&r).unwrap());

        s.name = "web".to_string();
        s.namespace = "prod".to_string();
        s.group = "apps".to_string();
        s.version = "v1".to_string();
        assert!(s.matches(&r).unwrap());

        s.kind = "Service".to_string();
        assert!(!s.matches(&r).unwrap());
    }

    #[test]
    fn test_label_and_annotation_requirements() {
        let r = web_deployment();

        let mut s = Selector::default();
        s.label_selector = "app=web,tier=frontend".to_string();
        assert!(s.matches(&r).unwrap());

        s.label_selector = "app=web,tier=backend".to_string();
        assert!(!s.matches(&r).unwrap());

        let mut s = Selector::default();
        s.annotation_selector = "team=platform".to_string();
        assert!(s.matches(&r).unwrap());

        s.annotation_selector = "team=web".to_string();
        assert!(!s.matches(&r).unwrap());
    }

    #[test]
    fn test_malformed_requirement_fails() {
        let mut s = Selector::default();
        s.label_selector = "app".to_string();
        let err = s.matches(&web_deployment()).unwrap_err();
        assert!(matches!(err, Error::MalformedSelector { .. }));
    }

    #[test]
    fn test_display_lists_populated_fields() {
        let mut s = Selector::default();
        s.kind = "Deployment".to_string();
        s.name = "web".to_string();
        assert_eq!(s.to_string(), "[kind=Deployment, name=web]");
    }
}
