//! Resource module - One manifest document and its bookkeeping.
//!
//! A resource is a JSON object body plus the per-patch permissive flags
//! and previous-identity history the applicators maintain.

mod resource;

#[cfg(test)]
mod resource_test;

pub use resource::*;
