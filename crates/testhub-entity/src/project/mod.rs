//! Project membership entities.

pub mod role;

pub use role::ProjectRole;
