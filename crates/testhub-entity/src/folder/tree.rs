//! Folder tree structures for hierarchical display.
//!
//! These are derived views: they are rebuilt from the flat folder list on
//! every read and are never persisted.

use serde::{Deserialize, Serialize};

use testhub_core::types::FolderId;

use super::model::Folder;

/// A node in a folder tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID as stored (may dangle for promoted orphans).
    pub parent_id: Option<FolderId>,
    /// Depth level (0 for roots).
    pub depth: u32,
    /// Child folder nodes.
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    /// Create a childless node for a folder at the given depth.
    pub fn leaf(folder: &Folder, depth: u32) -> Self {
        Self {
            id: folder.id.clone(),
            name: folder.name.clone(),
            parent_id: folder.parent_id.clone(),
            depth,
            children: Vec::new(),
        }
    }

    /// Visit this node and its descendants in pre-order.
    pub fn walk<'a>(&'a self, out: &mut Vec<&'a FolderNode>) {
        out.push(self);
        for child in &self.children {
            child.walk(out);
        }
    }
}

/// A complete folder forest for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderTree {
    /// The root node(s) of the tree.
    pub roots: Vec<FolderNode>,
    /// Total number of folders in the tree.
    pub total_folders: u64,
}

impl FolderTree {
    /// Create an empty folder tree.
    pub fn empty() -> Self {
        Self {
            roots: Vec::new(),
            total_folders: 0,
        }
    }

    /// Wrap a set of roots, counting every node.
    pub fn from_roots(roots: Vec<FolderNode>) -> Self {
        let total_folders = roots.iter().map(count).sum();
        Self {
            roots,
            total_folders,
        }
    }

    /// All nodes in pre-order (each root followed by its subtree).
    pub fn pre_order(&self) -> Vec<&FolderNode> {
        let mut out = Vec::with_capacity(self.total_folders as usize);
        for root in &self.roots {
            root.walk(&mut out);
        }
        out
    }
}

fn count(node: &FolderNode) -> u64 {
    1 + node.children.iter().map(count).sum::<u64>()
}
