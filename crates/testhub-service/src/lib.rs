//! # testhub-service
//!
//! Business logic for TestHub's folder organizer. [`FolderTreeManager`]
//! owns one project's flat folder collection and guards its structure;
//! [`FolderService`] adds role checks, per-project sessions and activity
//! events on top.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod folder;

pub use context::RequestContext;
pub use folder::{FolderService, FolderStore, FolderTreeManager, KvFolderStore};
