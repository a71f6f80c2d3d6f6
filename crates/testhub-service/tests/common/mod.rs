//! Shared helpers for folder integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Notify;

use testhub_core::config::folders::{FolderConfig, OrphanPolicy, PersistFailurePolicy};
use testhub_core::error::AppError;
use testhub_core::result::AppResult;
use testhub_core::traits::store::KeyValueStore;
use testhub_core::types::{FolderId, ProjectId};
use testhub_entity::folder::Folder;
use testhub_service::folder::{FolderStore, FolderTreeManager, KvFolderStore};
use testhub_store::keys;
use testhub_store::memory::MemoryStore;

/// Builds a folder whose name is its upper-cased id.
pub fn folder(id: &str, parent: Option<&str>) -> Folder {
    Folder::new(id, id.to_uppercase(), parent.map(FolderId::from))
}

/// The `a -> b -> c` chain used by several scenarios.
pub fn chain() -> Vec<Folder> {
    vec![
        folder("a", None),
        folder("b", Some("a")),
        folder("c", Some("b")),
    ]
}

/// Sorted ids of a folder slice.
pub fn sorted_ids(folders: &[Folder]) -> Vec<String> {
    let mut ids: Vec<String> = folders.iter().map(|f| f.id.to_string()).collect();
    ids.sort();
    ids
}

/// A memory-backed store plus handles to inspect it.
pub struct Fixture {
    pub project_id: ProjectId,
    pub kv: MemoryStore,
    pub store: Arc<KvFolderStore>,
}

impl Fixture {
    /// Seeds the store with `folders` for a fresh project.
    pub async fn seeded(folders: &[Folder]) -> Self {
        let project_id = ProjectId::new();
        let kv = MemoryStore::new();
        let store = Arc::new(KvFolderStore::new(Arc::new(kv.clone())));
        store
            .save(&keys::folder_scope(project_id), folders)
            .await
            .unwrap();
        Self {
            project_id,
            kv,
            store,
        }
    }

    /// Opens a manager with default policies.
    pub async fn open(&self) -> FolderTreeManager {
        self.open_with(FolderConfig::default()).await
    }

    /// Opens a manager with the given policies.
    pub async fn open_with(&self, config: FolderConfig) -> FolderTreeManager {
        FolderTreeManager::open(self.project_id, self.store.clone(), config)
            .await
            .unwrap()
    }

    /// What is currently persisted for the project.
    pub async fn persisted(&self) -> Vec<Folder> {
        self.store
            .load(&keys::folder_scope(self.project_id))
            .await
            .unwrap()
            .unwrap_or_default()
    }

    /// Whether anything was ever written for the project.
    pub async fn has_saved(&self) -> bool {
        self.kv
            .exists(&keys::folder_scope(self.project_id))
            .await
            .unwrap()
    }
}

/// A store whose saves can be made to fail on demand.
///
/// Keeps a single collection and ignores the scope key.
#[derive(Debug, Default)]
pub struct FlakyStore {
    saved: Mutex<Option<Vec<Folder>>>,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn new(folders: &[Folder]) -> Self {
        Self {
            saved: Mutex::new(Some(folders.to_vec())),
            failing: AtomicBool::new(false),
        }
    }

    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn saved(&self) -> Vec<Folder> {
        self.saved.lock().unwrap().clone().unwrap_or_default()
    }
}

#[async_trait]
impl FolderStore for FlakyStore {
    async fn load(&self, _scope_key: &str) -> AppResult<Option<Vec<Folder>>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    async fn save(&self, _scope_key: &str, folders: &[Folder]) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::storage("store unavailable"));
        }
        *self.saved.lock().unwrap() = Some(folders.to_vec());
        Ok(())
    }
}

/// A memory-backed store that holds saves for one scope key until released.
#[derive(Debug)]
pub struct GatedStore {
    inner: KvFolderStore,
    gated_key: String,
    entered: Notify,
    gate: Notify,
}

impl GatedStore {
    pub fn new(gated_project: ProjectId) -> Self {
        Self {
            inner: KvFolderStore::new(Arc::new(MemoryStore::new())),
            gated_key: keys::folder_scope(gated_project),
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    /// Resolves once a save for the gated project is waiting.
    pub async fn save_started(&self) {
        self.entered.notified().await;
    }

    /// Lets the waiting save through.
    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl FolderStore for GatedStore {
    async fn load(&self, scope_key: &str) -> AppResult<Option<Vec<Folder>>> {
        self.inner.load(scope_key).await
    }

    async fn save(&self, scope_key: &str, folders: &[Folder]) -> AppResult<()> {
        if scope_key == self.gated_key {
            self.entered.notify_one();
            self.gate.notified().await;
        }
        self.inner.save(scope_key, folders).await
    }
}

/// Policy shorthand.
pub fn config(orphan_policy: OrphanPolicy, persist_failure: PersistFailurePolicy) -> FolderConfig {
    FolderConfig {
        orphan_policy,
        persist_failure,
    }
}
