//! ResMap implementation.

use crate::error::Result;
use crate::resid::ResId;
use crate::resource::Resource;
use crate::selector::Selector;
use serde::Deserialize;
use serde_json::Value;

/// ResMap is the ordered collection of resources a transformation
/// operates on. Resources are mutated in place; the collection owns
/// them and hands out indices or borrows to selected members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResMap {
    resources: Vec<Resource>,
}

impl ResMap {
    /// Creates an empty ResMap.
    pub fn new() -> Self {
        ResMap::default()
    }

    /// Parses a YAML document stream into a ResMap, in stream order.
    /// Empty documents are skipped.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let mut m = ResMap::new();
        for document in serde_yaml::Deserializer::from_str(text) {
            let value = Value::deserialize(document)?;
            if value.is_null() {
                continue;
            }
            m.append(Resource::from_value(value)?);
        }
        Ok(m)
    }

    /// Appends a resource, keeping collection order.
    pub fn append(&mut self, resource: Resource) {
        self.resources.push(resource);
    }

    /// Returns the number of resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns the resource at `index`.
    pub fn get(&self, index: usize) -> Option<&Resource> {
        self.resources.get(index)
    }

    /// Returns a mutable borrow of the resource at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Resource> {
        self.resources.get_mut(index)
    }

    /// Iterates resources in collection order.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.iter()
    }

    /// Returns the indices of all resources matching the selector, in
    /// collection order. Fails only if the selector itself is malformed.
    pub fn select(&self, selector: &Selector) -> Result<Vec<usize>> {
        let mut matched = Vec::new();
        for (i, resource) in self.resources.iter().enumerate() {
            if selector.matches(resource)? {
                matched.push(i);
            }
        }
        Ok(matched)
    }

    /// Finds the resource identified by `id`, matching against each
    /// resource's original identity so renamed resources stay findable.
    pub fn get_by_id(&self, id: &ResId) -> Option<usize> {
        self.resources
            .iter()
            .position(|r| id.is_selected(&r.org_id()))
    }

    /// Consumes the collection, returning the resources in order.
    pub fn into_resources(self) -> Vec<Resource> {
        self.resources
    }

    /// Serializes the collection back into a YAML document stream.
    pub fn as_yaml(&self) -> Result<String> {
        let mut out = String::new();
        for (i, resource) in self.resources.iter().enumerate() {
            if i > 0 {
                out.push_str("---\n");
            }
            out.push_str(&serde_yaml::to_string(resource.body())?);
        }
        Ok(out)
    }
}
