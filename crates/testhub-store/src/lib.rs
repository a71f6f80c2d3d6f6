//! # testhub-store
//!
//! Key-value store backends for TestHub. Supports three providers:
//!
//! - **memory**: process-local map using [dashmap](https://crates.io/crates/dashmap)
//! - **local**: one JSON file per key on the local filesystem
//! - **redis**: Redis-backed store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "local")]
pub mod local;
pub mod manager;
#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use manager::StoreManager;
