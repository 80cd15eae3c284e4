//! Permission Definitions
//!
//! 默认角色及其授权表。
//!
//! Role evaluation itself lives on [`Role::has_permission`]; this module owns
//! the fixed default role set seeded at startup. The wildcard `all` resource
//! appears only in SUPER_ADMIN so operator-visible roles stay explicit.

use crate::db::models::{Action, Grant, Resource, Role};

/// Fixed role names
pub const SUPER_ADMIN: &str = "SUPER_ADMIN";
pub const ADMIN: &str = "ADMIN";
pub const EDITOR: &str = "EDITOR";
pub const REVIEWER: &str = "REVIEWER";
pub const USER: &str = "USER";

use crate::db::models::Action::{Create, Delete, Moderate, Publish, Read, Update};

/// The default role set created at bootstrap (create-if-absent by name).
pub fn default_roles() -> Vec<Role> {
    vec![
        Role {
            is_system: true,
            ..Role::new(
                SUPER_ADMIN,
                "Full system access",
                vec![Grant::new(
                    Resource::All,
                    &[Create, Read, Update, Delete, Publish, Moderate],
                )],
            )
        },
        Role::new(
            ADMIN,
            "Administrative access to most features",
            vec![
                Grant::new(Resource::Users, &[Create, Read, Update, Delete]),
                Grant::new(Resource::Categories, &[Create, Read, Update, Delete]),
                Grant::new(Resource::Subcategories, &[Create, Read, Update, Delete]),
                Grant::new(
                    Resource::Reviews,
                    &[Create, Read, Update, Delete, Publish, Moderate],
                ),
                Grant::new(Resource::Comments, &[Read, Update, Delete, Moderate]),
                Grant::new(Resource::TechNews, &[Create, Read, Update, Delete, Publish]),
                Grant::new(Resource::StaticPages, &[Create, Read, Update, Delete]),
            ],
        ),
        Role::new(
            EDITOR,
            "Content creation and editing access",
            vec![
                Grant::new(Resource::Reviews, &[Create, Read, Update, Publish]),
                Grant::new(Resource::TechNews, &[Create, Read, Update, Publish]),
                Grant::new(Resource::Comments, &[Read, Moderate]),
                Grant::new(Resource::Categories, &[Read]),
                Grant::new(Resource::Subcategories, &[Read]),
            ],
        ),
        Role::new(
            REVIEWER,
            "Product review creation access",
            vec![
                Grant::new(Resource::Reviews, &[Create, Read, Update]),
                Grant::new(Resource::Comments, &[Read]),
                Grant::new(Resource::Categories, &[Read]),
                Grant::new(Resource::Subcategories, &[Read]),
            ],
        ),
        Role::new(
            USER,
            "Basic user access",
            vec![
                Grant::new(Resource::Reviews, &[Read]),
                Grant::new(Resource::Comments, &[Create, Read, Update]),
                Grant::new(Resource::TechNews, &[Read]),
                Grant::new(Resource::Categories, &[Read]),
                Grant::new(Resource::Subcategories, &[Read]),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str) -> Role {
        default_roles()
            .into_iter()
            .find(|r| r.name == name)
            .expect("default role")
    }

    #[test]
    fn test_super_admin_has_everything() {
        let sa = role(SUPER_ADMIN);
        assert!(sa.has_permission(Resource::Users, Action::Delete));
        assert!(sa.has_permission(Resource::StaticPages, Action::Create));
        assert!(sa.has_permission(Resource::Comments, Action::Moderate));
    }

    #[test]
    fn test_editor_cannot_touch_taxonomy() {
        let editor = role(EDITOR);
        assert!(!editor.has_permission(Resource::Categories, Action::Create));
        assert!(editor.has_permission(Resource::Categories, Action::Read));
        assert!(editor.has_permission(Resource::Reviews, Action::Publish));
    }

    #[test]
    fn test_admin_can_create_categories() {
        let admin = role(ADMIN);
        assert!(admin.has_permission(Resource::Categories, Action::Create));
        // publish is confined to content resources
        assert!(!admin.has_permission(Resource::Categories, Action::Publish));
    }

    #[test]
    fn test_reviewer_scope() {
        let reviewer = role(REVIEWER);
        assert!(reviewer.has_permission(Resource::Reviews, Action::Update));
        assert!(!reviewer.has_permission(Resource::Reviews, Action::Publish));
        assert!(!reviewer.has_permission(Resource::TechNews, Action::Create));
    }

    #[test]
    fn test_user_is_read_mostly() {
        let user = role(USER);
        assert!(user.has_permission(Resource::Comments, Action::Create));
        assert!(!user.has_permission(Resource::Comments, Action::Moderate));
        assert!(!user.has_permission(Resource::Users, Action::Read));
    }

    #[test]
    fn test_only_super_admin_uses_the_wildcard() {
        for r in default_roles() {
            let uses_wildcard = r.permissions.iter().any(|g| g.resource == Resource::All);
            assert_eq!(uses_wildcard, r.name == SUPER_ADMIN);
        }
    }
}
