//! Error taxonomy for patch classification and application.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error covers every failure mode of configuring and applying a patch.
///
/// Errors are surfaced immediately to the caller with the patch source
/// label or target identity needed to diagnose without re-running; none
/// are recovered or retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration, e.g. mutually exclusive fields both set,
    /// or a JSON patch configured without a target selector.
    #[error("{message}")]
    Configuration { message: String },

    /// The external loader could not produce the patch content.
    #[error("failed to get the patch file from path({path}): {source}")]
    Load {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The text parses as a non-empty instance of both patch grammars.
    #[error("illegally qualifies as both a strategic-merge and JSON patch: {source_label}")]
    AmbiguousPatch { source_label: String },

    /// The text parses under neither patch grammar.
    #[error("unable to parse strategic-merge or JSON patch from {source_label}")]
    UnparseablePatch { source_label: String },

    /// An empty operation-list string is an error, not a no-op.
    #[error("empty json patch operations")]
    EmptyPatch,

    /// A selector or identity lookup found nothing.
    #[error("no resource matches {what}")]
    NoMatch { what: String },

    /// A target selector cannot be divided across multiple merge patches.
    #[error("a target selector is not allowed with multiple strategic-merge patches: {source_label}")]
    MultiplePatchesWithTarget { source_label: String },

    /// A label or annotation selector that cannot be parsed.
    #[error("invalid selector requirement {requirement:?}: {message}")]
    MalformedSelector {
        requirement: String,
        message: String,
    },

    /// A strategic merge was rejected or failed for one patch entry.
    #[error("merging patch {patch_id} into {target_id}: {message}")]
    Merge {
        patch_id: String,
        target_id: String,
        message: String,
    },

    /// The RFC 6902 engine rejected an operation.
    #[error("applying JSON patch to {target_id}: {source}")]
    OperationApply {
        target_id: String,
        #[source]
        source: json_patch::PatchError,
    },

    /// A resource or configuration document that is not a YAML mapping.
    #[error("expected a YAML mapping, got: {actual}")]
    NotAMapping { actual: String },

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Creates a no-match error naming what could not be resolved.
    pub fn no_match(what: impl Into<String>) -> Self {
        Error::NoMatch { what: what.into() }
    }

    /// Creates a merge error with the patch and target identities.
    pub fn merge(
        patch_id: impl Into<String>,
        target_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Merge {
            patch_id: patch_id.into(),
            target_id: target_id.into(),
            message: message.into(),
        }
    }
}
