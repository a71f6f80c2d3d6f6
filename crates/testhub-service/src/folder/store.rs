//! Persistence seam for folder collections.

use std::sync::Arc;

use async_trait::async_trait;

use testhub_core::result::AppResult;
use testhub_core::traits::store::KeyValueStore;
use testhub_entity::folder::Folder;

/// Load/save contract for a project's flat folder collection.
///
/// The whole collection is written on every save; there is no partial sync.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Load the collection stored under `scope_key`, `None` if never saved.
    async fn load(&self, scope_key: &str) -> AppResult<Option<Vec<Folder>>>;

    /// Replace the collection stored under `scope_key`.
    async fn save(&self, scope_key: &str, folders: &[Folder]) -> AppResult<()>;
}

/// [`FolderStore`] that keeps each collection as a JSON array in a
/// key-value backend.
#[derive(Debug, Clone)]
pub struct KvFolderStore {
    kv: Arc<dyn KeyValueStore>,
}

impl KvFolderStore {
    /// Wrap a key-value backend.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }
}

#[async_trait]
impl FolderStore for KvFolderStore {
    async fn load(&self, scope_key: &str) -> AppResult<Option<Vec<Folder>>> {
        match self.kv.get(scope_key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, scope_key: &str, folders: &[Folder]) -> AppResult<()> {
        let json = serde_json::to_string(folders)?;
        self.kv.set(scope_key, &json).await
    }
}
