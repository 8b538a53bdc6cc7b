//! ResMap module - The ordered collection of resources being transformed.

mod resmap;


pub use resmap::*;
