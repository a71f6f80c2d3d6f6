//! Redis store backend.

pub mod client;
pub mod store;

pub use client::{RedisClient, mask_redis_url};
pub use store::RedisStore;
