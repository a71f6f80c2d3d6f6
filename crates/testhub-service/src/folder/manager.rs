//! Per-project folder tree manager.
//!
//! The manager owns the flat folder collection of one project. Every
//! mutation is validated against the in-memory collection first, applied,
//! and then the whole collection is written back to the store. Structural
//! violations are rejected before anything changes.

use std::sync::Arc;

use tracing::{info, warn};

use testhub_core::config::folders::{FolderConfig, PersistFailurePolicy};
use testhub_core::error::{AppError, ErrorKind};
use testhub_core::result::AppResult;
use testhub_core::types::{FolderId, ProjectId};
use testhub_entity::folder::{Folder, FolderTree};
use testhub_store::keys;

use super::store::FolderStore;
use super::tree::{self, MAX_FOLDER_DEPTH};

/// Longest accepted folder name, in characters.
pub const MAX_FOLDER_NAME_LEN: usize = 255;

/// Owns and mutates the folder collection of a single project.
#[derive(Debug)]
pub struct FolderTreeManager {
    project_id: ProjectId,
    scope_key: String,
    folders: Vec<Folder>,
    store: Arc<dyn FolderStore>,
    config: FolderConfig,
}

impl FolderTreeManager {
    /// Loads the project's collection from the store.
    ///
    /// A project that was never saved starts empty. A stored collection with
    /// duplicate ids or parent cycles is refused.
    pub async fn open(
        project_id: ProjectId,
        store: Arc<dyn FolderStore>,
        config: FolderConfig,
    ) -> AppResult<Self> {
        let scope_key = keys::folder_scope(project_id);
        let folders = store.load(&scope_key).await?.unwrap_or_default();
        tree::validate_collection(&folders, config.orphan_policy)?;

        info!(
            project_id = %project_id,
            folder_count = folders.len(),
            "Folder collection loaded"
        );

        Ok(Self {
            project_id,
            scope_key,
            folders,
            store,
            config,
        })
    }

    /// The store key the collection is saved under.
    pub fn scope_key(&self) -> &str {
        &self.scope_key
    }

    /// The current flat collection.
    pub fn list_folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Looks up a folder by id.
    pub fn get_folder(&self, folder_id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == folder_id)
    }

    /// Derives the nested tree from the current collection.
    pub fn tree(&self) -> AppResult<FolderTree> {
        tree::build_tree_with_policy(&self.folders, self.config.orphan_policy)
    }

    /// Folders from the root down to `folder_id`.
    pub fn folder_path(&self, folder_id: &FolderId) -> Vec<Folder> {
        tree::folder_path(&self.folders, folder_id)
    }

    /// Creates a folder, optionally below an existing parent.
    pub async fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        validate_name(name)?;

        if let Some(parent) = &parent_id {
            let path = tree::folder_path(&self.folders, parent);
            if path.is_empty() {
                return Err(AppError::not_found(format!(
                    "Parent folder '{parent}' not found"
                )));
            }
            check_depth(path.len() + 1)?;
        }

        let id = loop {
            let candidate = FolderId::generate();
            if self.get_folder(&candidate).is_none() {
                break candidate;
            }
        };

        let folder = Folder::new(id, name, parent_id);
        let snapshot = self.snapshot();
        self.folders.push(folder.clone());
        self.persist(snapshot).await?;

        info!(
            project_id = %self.project_id,
            folder_id = %folder.id,
            parent_id = ?folder.parent_id.as_ref().map(FolderId::as_str),
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder.
    pub async fn rename_folder(&mut self, folder_id: &FolderId, new_name: &str) -> AppResult<()> {
        validate_name(new_name)?;

        let index = self.position(folder_id)?;
        let snapshot = self.snapshot();
        self.folders[index].name = new_name.to_string();
        self.persist(snapshot).await?;

        info!(
            project_id = %self.project_id,
            folder_id = %folder_id,
            new_name = %new_name,
            "Folder renamed"
        );

        Ok(())
    }

    /// Deletes a folder together with all its descendants.
    ///
    /// Returns the removed ids in collection order. Deleting an id that is
    /// not present succeeds and removes nothing.
    pub async fn delete_folder(&mut self, folder_id: &FolderId) -> AppResult<Vec<FolderId>> {
        let closure = tree::descendant_closure(&self.folders, folder_id);
        if closure.is_empty() {
            return Ok(Vec::new());
        }

        let snapshot = self.snapshot();
        let mut removed = Vec::with_capacity(closure.len());
        self.folders.retain(|f| {
            if closure.contains(&f.id) {
                removed.push(f.id.clone());
                false
            } else {
                true
            }
        });
        self.persist(snapshot).await?;

        info!(
            project_id = %self.project_id,
            folder_id = %folder_id,
            removed = removed.len(),
            "Folder deleted"
        );

        Ok(removed)
    }

    /// Moves a folder below a new parent, or to the root when `None`.
    ///
    /// Moving a folder into itself or one of its descendants fails with a
    /// cycle error and leaves the collection untouched. Returns `false` when
    /// the folder already had that parent and nothing was written.
    pub async fn move_folder(
        &mut self,
        folder_id: &FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<bool> {
        let index = self.position(folder_id)?;

        // The target lies inside the moved subtree exactly when the moved
        // folder is on the target's path to its root.
        let above = match &new_parent_id {
            None => 0,
            Some(parent) => {
                let path = tree::folder_path(&self.folders, parent);
                if path.is_empty() {
                    return Err(AppError::not_found(format!(
                        "Target folder '{parent}' not found"
                    )));
                }
                if path.iter().any(|f| &f.id == folder_id) {
                    return Err(AppError::cycle(format!(
                        "Cannot move folder '{folder_id}' into itself or one of its descendants"
                    )));
                }
                path.len()
            }
        };

        if self.folders[index].parent_id == new_parent_id {
            return Ok(false);
        }

        check_depth(above + tree::subtree_height(&self.folders, folder_id))?;

        let snapshot = self.snapshot();
        self.folders[index].parent_id = new_parent_id;
        self.persist(snapshot).await?;

        info!(
            project_id = %self.project_id,
            folder_id = %folder_id,
            new_parent = ?self.folders[index].parent_id.as_ref().map(FolderId::as_str),
            "Folder moved"
        );

        Ok(true)
    }

    fn position(&self, folder_id: &FolderId) -> AppResult<usize> {
        self.folders
            .iter()
            .position(|f| &f.id == folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder '{folder_id}' not found")))
    }

    /// Pre-mutation copy, only taken when a failed save must be undone.
    fn snapshot(&self) -> Option<Vec<Folder>> {
        match self.config.persist_failure {
            PersistFailurePolicy::Revert => Some(self.folders.clone()),
            PersistFailurePolicy::Keep => None,
        }
    }

    async fn persist(&mut self, snapshot: Option<Vec<Folder>>) -> AppResult<()> {
        let Err(e) = self.store.save(&self.scope_key, &self.folders).await else {
            return Ok(());
        };

        warn!(
            project_id = %self.project_id,
            scope_key = %self.scope_key,
            policy = %self.config.persist_failure,
            error = %e,
            "Failed to save folder collection"
        );

        if let Some(previous) = snapshot {
            self.folders = previous;
        }

        Err(AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to save folders for project {}", self.project_id),
            e,
        ))
    }
}

fn check_depth(levels: usize) -> AppResult<()> {
    if levels > MAX_FOLDER_DEPTH {
        return Err(AppError::validation(format!(
            "Folders cannot be nested deeper than {MAX_FOLDER_DEPTH} levels"
        )));
    }
    Ok(())
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    if name.chars().count() > MAX_FOLDER_NAME_LEN {
        return Err(AppError::validation(format!(
            "Folder name cannot exceed {MAX_FOLDER_NAME_LEN} characters"
        )));
    }
    Ok(())
}
