//! Transformer module - Patch source resolution, classification and
//! application.
//!
//! The [`PatchTransformer`] is the host-facing surface: `configure`
//! resolves the patch source and classifies the text, `transform`
//! applies the classified patch to a collection.

mod classify;
mod loader;
mod transformer;



pub use classify::*;
pub use loader::*;
pub use transformer::*;
