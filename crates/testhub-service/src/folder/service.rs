//! Folder operations with role enforcement and activity events.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell, broadcast};
use tracing::debug;

use testhub_core::config::folders::FolderConfig;
use testhub_core::error::AppError;
use testhub_core::events::{DomainEvent, EventPayload, FolderEvent};
use testhub_core::result::AppResult;
use testhub_core::types::{FolderId, ProjectId};
use testhub_entity::folder::{Folder, FolderTree};

use super::manager::FolderTreeManager;
use super::store::FolderStore;
use crate::context::RequestContext;

/// Buffered activity events per subscriber before the oldest are dropped.
const EVENT_CAPACITY: usize = 256;

/// One project's loaded collection behind its own writer lock.
type Session = Arc<Mutex<FolderTreeManager>>;

/// Manages the folder trees of all projects touched by this process.
///
/// Each project's collection is loaded once, on first access, and kept
/// for later calls. Every project has its own lock, so a project has
/// exactly one writer at a time while different projects proceed
/// independently.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder persistence.
    store: Arc<dyn FolderStore>,
    /// Tree policies.
    config: FolderConfig,
    /// Loaded collections by project; a cell stays empty until its load succeeds.
    sessions: Arc<Mutex<HashMap<ProjectId, Arc<OnceCell<Session>>>>>,
    /// Activity event channel.
    events: broadcast::Sender<DomainEvent>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(store: Arc<dyn FolderStore>, config: FolderConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            config,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            events,
        }
    }

    /// Subscribes to folder activity events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    /// Lists the flat folder collection of a project.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> AppResult<Vec<Folder>> {
        require_view(ctx)?;
        let session = self.session(project_id).await?;
        let manager = session.lock().await;
        Ok(manager.list_folders().to_vec())
    }

    /// Builds the nested folder tree of a project.
    pub async fn get_tree(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
    ) -> AppResult<FolderTree> {
        require_view(ctx)?;
        let session = self.session(project_id).await?;
        let manager = session.lock().await;
        manager.tree()
    }

    /// Gets the breadcrumb trail from the root to the given folder.
    pub async fn get_folder_path(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        folder_id: &FolderId,
    ) -> AppResult<Vec<Folder>> {
        require_view(ctx)?;
        let session = self.session(project_id).await?;
        let manager = session.lock().await;
        Ok(manager.folder_path(folder_id))
    }

    /// Creates a new folder.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        name: &str,
        parent_id: Option<FolderId>,
    ) -> AppResult<Folder> {
        require_edit(ctx)?;
        let session = self.session(project_id).await?;
        let mut manager = session.lock().await;
        let folder = manager.create_folder(name, parent_id).await?;

        self.publish(
            ctx,
            project_id,
            FolderEvent::Created {
                folder_id: folder.id.clone(),
                parent_id: folder.parent_id.clone(),
                name: folder.name.clone(),
            },
        );
        Ok(folder)
    }

    /// Renames a folder.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        folder_id: &FolderId,
        new_name: &str,
    ) -> AppResult<()> {
        require_edit(ctx)?;
        let session = self.session(project_id).await?;
        let mut manager = session.lock().await;
        manager.rename_folder(folder_id, new_name).await?;

        self.publish(
            ctx,
            project_id,
            FolderEvent::Renamed {
                folder_id: folder_id.clone(),
                name: new_name.to_string(),
            },
        );
        Ok(())
    }

    /// Deletes a folder and all its descendants.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        folder_id: &FolderId,
    ) -> AppResult<Vec<FolderId>> {
        require_edit(ctx)?;
        let session = self.session(project_id).await?;
        let mut manager = session.lock().await;
        let removed = manager.delete_folder(folder_id).await?;

        if !removed.is_empty() {
            self.publish(
                ctx,
                project_id,
                FolderEvent::Deleted {
                    folder_id: folder_id.clone(),
                    removed: removed.clone(),
                },
            );
        }
        Ok(removed)
    }

    /// Moves a folder to a new parent, or to the root when `None`.
    pub async fn move_folder(
        &self,
        ctx: &RequestContext,
        project_id: ProjectId,
        folder_id: &FolderId,
        new_parent_id: Option<FolderId>,
    ) -> AppResult<()> {
        require_edit(ctx)?;
        let session = self.session(project_id).await?;
        let mut manager = session.lock().await;
        if !manager.move_folder(folder_id, new_parent_id.clone()).await? {
            return Ok(());
        }

        self.publish(
            ctx,
            project_id,
            FolderEvent::Moved {
                folder_id: folder_id.clone(),
                new_parent_id,
            },
        );
        Ok(())
    }

    /// Drops the loaded collection of a project; the next call reloads it.
    ///
    /// Returns `false` when nothing was loaded for the project.
    pub async fn evict(&self, project_id: ProjectId) -> bool {
        self.sessions
            .lock()
            .await
            .remove(&project_id)
            .is_some_and(|cell| cell.initialized())
    }

    /// The project's session, loading it on first use.
    ///
    /// The map lock is released before loading; concurrent first calls for
    /// the same project share a single load.
    async fn session(&self, project_id: ProjectId) -> AppResult<Session> {
        let cell = self
            .sessions
            .lock()
            .await
            .entry(project_id)
            .or_default()
            .clone();

        let session = cell
            .get_or_try_init(|| async {
                let manager =
                    FolderTreeManager::open(project_id, self.store.clone(), self.config).await?;
                Ok::<_, AppError>(Arc::new(Mutex::new(manager)))
            })
            .await?;
        Ok(session.clone())
    }

    fn publish(&self, ctx: &RequestContext, project_id: ProjectId, event: FolderEvent) {
        let event = DomainEvent::new(Some(ctx.user_id), project_id, EventPayload::Folder(event));
        if self.events.send(event).is_err() {
            debug!(project_id = %project_id, "No activity subscribers");
        }
    }
}

fn require_view(ctx: &RequestContext) -> AppResult<()> {
    if ctx.role.can_view() {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "Role '{}' cannot view folders",
            ctx.role
        )))
    }
}

fn require_edit(ctx: &RequestContext) -> AppResult<()> {
    if ctx.role.can_edit_folders() {
        Ok(())
    } else {
        Err(AppError::authorization(format!(
            "Role '{}' cannot modify folders",
            ctx.role
        )))
    }
}
