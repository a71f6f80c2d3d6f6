//! Request context carrying the acting user and their project role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use testhub_core::types::UserId;
use testhub_entity::project::ProjectRole;

/// Context for the current request.
///
/// Passed into service methods so that every operation knows *who* is
/// acting and with which role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The user's role in the project being accessed.
    pub role: ProjectRole,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role: ProjectRole) -> Self {
        Self {
            user_id,
            role,
            request_time: Utc::now(),
        }
    }

    /// Context for local administrative tooling, acting as project owner.
    pub fn local_admin() -> Self {
        Self::new(UserId::from(Uuid::nil()), ProjectRole::Owner)
    }
}
