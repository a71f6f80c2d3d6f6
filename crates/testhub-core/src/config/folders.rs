//! Folder tree policy configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How folders whose parent id matches no folder are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Show the folder as a root.
    #[default]
    Promote,
    /// Refuse the collection with an integrity error.
    Reject,
}

/// What happens to the in-memory collection when saving it fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistFailurePolicy {
    /// Keep the mutation in memory; the store is stale until the next save.
    #[default]
    Keep,
    /// Restore the collection as it was before the mutation.
    Revert,
}

/// Folder tree behaviour settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Dangling parent handling.
    #[serde(default)]
    pub orphan_policy: OrphanPolicy,
    /// Failed save handling.
    #[serde(default)]
    pub persist_failure: PersistFailurePolicy,
}

impl fmt::Display for OrphanPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Promote => write!(f, "promote"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl fmt::Display for PersistFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => write!(f, "keep"),
            Self::Revert => write!(f, "revert"),
        }
    }
}
