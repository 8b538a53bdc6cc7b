//! # Manifest Patch
//!
//! Patch classification and application for Kubernetes-style resource
//! manifests.
//!
//! Given raw patch text, this library determines whether it expresses a
//! strategic-merge patch (a partial document merged field-by-field into
//! a target) or an RFC 6902 JSON-Patch operation list, resolves which
//! resources the patch applies to, and applies it while preserving the
//! internal provenance annotations the patch format does not understand.
//!
//! ## Modules
//!
//! - [`resid`] - Resource identity (group/version/kind/namespace/name)
//! - [`resource`] - One manifest document and its bookkeeping
//! - [`resmap`] - The ordered resource collection being transformed
//! - [`selector`] - Queries describing which resources a patch targets
//! - [`smpatch`] - Strategic-merge field semantics
//! - [`transformer`] - Source resolution, classification and the two
//!   patch applicators
//!
//! ## Example
//!
//! ```
//! use manifest_patch::{MemLoader, PatchTransformer, ResMap};
//!
//! let config = r#"
//! patch: '[{"op": "replace", "path": "/spec/replicas", "value": 5}]'
//! target:
//!   kind: Deployment
//!   name: web
//! "#;
//!
//! let mut m = ResMap::from_yaml(
//!     "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\nspec:\n  replicas: 3\n",
//! )
//! .unwrap();
//!
//! let t = PatchTransformer::configure(&MemLoader::new(), config.as_bytes()).unwrap();
//! t.transform(&mut m).unwrap();
//! assert_eq!(m.get(0).unwrap().body()["spec"]["replicas"], 5);
//! ```

pub mod error;
pub mod resid;
pub mod resmap;
pub mod resource;
pub mod selector;
pub mod smpatch;
pub mod transformer;

pub use error::{Error, Result};
pub use resid::{Gvk, ResId};
pub use resmap::ResMap;
pub use resource::Resource;
pub use selector::Selector;
pub use transformer::{FsLoader, Loader, MemLoader, PatchTransformer, ResolvedPatch};
