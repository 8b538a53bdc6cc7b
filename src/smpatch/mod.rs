//! Strategic-merge module - Field-by-field patch semantics.
//!
//! Null-valued patch fields delete the target field, maps merge
//! recursively, lists merge by key when one is available and
//! positionally otherwise.

mod merge;

#[cfg(test)]
mod merge_test;

pub use merge::*;
