//! Core traits defined in `testhub-core` and implemented by other crates.

pub mod store;

pub use store::KeyValueStore;
