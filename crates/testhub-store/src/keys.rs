//! Store key builders.
//!
//! Centralising key construction keeps the scope-key derivation in one
//! place; backends add their own prefix on top.

use testhub_core::types::ProjectId;

/// Scope key under which a project's folder collection is persisted.
pub fn folder_scope(project_id: ProjectId) -> String {
    format!("folders:{project_id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_folder_scope_key() {
        let id = ProjectId::from(Uuid::nil());
        assert_eq!(
            folder_scope(id),
            "folders:00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_folder_scope_is_deterministic() {
        let id = ProjectId::new();
        assert_eq!(folder_scope(id), folder_scope(id));
    }
}
