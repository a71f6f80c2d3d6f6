//! Project member roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a member can hold within a project.
///
/// Roles are ordered by privilege level: Owner > Admin > Editor > Viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    /// Owns the project; cannot be managed by other members.
    Owner,
    /// Manages members and project settings.
    Admin,
    /// Edits test cases and folders.
    Editor,
    /// Read-only access.
    Viewer,
}

impl ProjectRole {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Owner => 4,
            Self::Admin => 3,
            Self::Editor => 2,
            Self::Viewer => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &ProjectRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Every role may read the folder tree.
    pub fn can_view(&self) -> bool {
        true
    }

    /// Whether this role may create, rename, move or delete folders.
    pub fn can_edit_folders(&self) -> bool {
        self.has_at_least(&Self::Editor)
    }

    /// Roles that a member holding this role may assign or revoke.
    pub fn manageable_roles(&self) -> &'static [ProjectRole] {
        match self {
            Self::Owner => &[Self::Admin, Self::Editor, Self::Viewer],
            Self::Admin => &[Self::Editor, Self::Viewer],
            Self::Editor | Self::Viewer => &[],
        }
    }

    /// Check if this role may manage a member holding `target`.
    pub fn can_manage(&self, target: &ProjectRole) -> bool {
        self.manageable_roles().contains(target)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for ProjectRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProjectRole {
    type Err = testhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(testhub_core::AppError::validation(format!(
                "Invalid project role: '{s}'. Expected one of: owner, admin, editor, viewer"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(ProjectRole::Owner.has_at_least(&ProjectRole::Viewer));
        assert!(ProjectRole::Admin.has_at_least(&ProjectRole::Admin));
        assert!(ProjectRole::Admin.has_at_least(&ProjectRole::Editor));
        assert!(!ProjectRole::Viewer.has_at_least(&ProjectRole::Editor));
    }

    #[test]
    fn test_folder_editing() {
        assert!(ProjectRole::Editor.can_edit_folders());
        assert!(ProjectRole::Owner.can_edit_folders());
        assert!(!ProjectRole::Viewer.can_edit_folders());
        assert!(ProjectRole::Viewer.can_view());
    }

    #[test]
    fn test_manageable_roles() {
        assert!(ProjectRole::Owner.can_manage(&ProjectRole::Admin));
        assert!(ProjectRole::Admin.can_manage(&ProjectRole::Viewer));
        assert!(!ProjectRole::Admin.can_manage(&ProjectRole::Admin));
        assert!(!ProjectRole::Admin.can_manage(&ProjectRole::Owner));
        assert!(!ProjectRole::Owner.can_manage(&ProjectRole::Owner));
        assert!(ProjectRole::Editor.manageable_roles().is_empty());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("owner".parse::<ProjectRole>().unwrap(), ProjectRole::Owner);
        assert_eq!("VIEWER".parse::<ProjectRole>().unwrap(), ProjectRole::Viewer);
        assert!("tester".parse::<ProjectRole>().is_err());
    }
}
