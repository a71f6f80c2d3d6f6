//! Folder tree management.

pub mod manager;
pub mod service;
pub mod store;
pub mod tree;

pub use manager::FolderTreeManager;
pub use service::FolderService;
pub use store::{FolderStore, KvFolderStore};
