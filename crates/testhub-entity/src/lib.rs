//! # testhub-entity
//!
//! Domain entity models for TestHub. Every struct in this crate is either
//! a persisted record or a value derived from one. All entities derive
//! `Debug`, `Clone`, `Serialize` and `Deserialize`.

pub mod folder;
pub mod project;
