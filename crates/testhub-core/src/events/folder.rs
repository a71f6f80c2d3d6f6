//! Folder-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::FolderId;

/// Events related to folder tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FolderEvent {
    /// A folder was created.
    Created {
        /// The new folder.
        folder_id: FolderId,
        /// Its parent, if any.
        parent_id: Option<FolderId>,
        /// The folder name.
        name: String,
    },
    /// A folder was renamed.
    Renamed {
        /// The folder ID.
        folder_id: FolderId,
        /// The new name.
        name: String,
    },
    /// A folder was moved under a new parent.
    Moved {
        /// The folder ID.
        folder_id: FolderId,
        /// The new parent (None for root).
        new_parent_id: Option<FolderId>,
    },
    /// A folder and its descendants were deleted.
    Deleted {
        /// The folder the delete was requested for.
        folder_id: FolderId,
        /// Every removed id, including `folder_id`.
        removed: Vec<FolderId>,
    },
}
