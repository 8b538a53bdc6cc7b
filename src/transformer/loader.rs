//! Loader - the external capability to fetch patch content by path.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// The error a loader surfaces; the transformer wraps it without
/// interpreting it.
pub type LoadFailure = Box<dyn std::error::Error + Send + Sync>;

/// Loader obtains raw content for a configured path. This is the only
/// I/O point of a patch operation; failures are surfaced, not retried.
pub trait Loader {
    fn load(&self, path: &str) -> Result<String, LoadFailure>;
}

/// FsLoader reads content from the filesystem, relative to a root.
#[derive(Debug, Clone)]
pub struct FsLoader {
    root: PathBuf,
}

impl FsLoader {
    /// Creates a loader rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsLoader { root: root.into() }
    }
}

impl Loader for FsLoader {
    fn load(&self, path: &str) -> Result<String, LoadFailure> {
        fs::read_to_string(self.root.join(path)).map_err(Into::into)
    }
}

/// MemLoader serves content from an in-memory table; used by hosts that
/// resolve paths themselves and throughout the tests.
#[derive(Debug, Clone, Default)]
pub struct MemLoader {
    files: BTreeMap<String, String>,
}

impl MemLoader {
    /// Creates an empty loader.
    pub fn new() -> Self {
        MemLoader::default()
    }

    /// Adds a file, returning self for chaining.
    pub fn with(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl Loader for MemLoader {
    fn load(&self, path: &str) -> Result<String, LoadFailure> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("'{}' doesn't exist", path).into())
    }
}
