//! Role Model
//!
//! A role is a named, ordered list of grants. A grant pairs one resource with
//! the set of actions allowed on it. Evaluation is deny-by-default: a role may
//! perform an action on a resource only if some grant names that resource (or
//! the `all` wildcard) and contains the action. The wildcard applies to
//! resources only; actions are always enumerated explicitly.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub const TABLE: &str = "role";
pub const FIELDS: &[&str] = &["name", "description", "permissions", "is_system", "is_active"];

/// Role ID type
pub type RoleId = RecordId;

/// Resources that can be granted. Wire names are fixed contract surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resource {
    Users,
    Categories,
    Subcategories,
    Reviews,
    Comments,
    TechNews,
    StaticPages,
    All,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Categories => "categories",
            Resource::Subcategories => "subcategories",
            Resource::Reviews => "reviews",
            Resource::Comments => "comments",
            Resource::TechNews => "tech-news",
            Resource::StaticPages => "static-pages",
            Resource::All => "all",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions that can appear in a grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Publish,
    Moderate,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Publish => "publish",
            Action::Moderate => "moderate",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One permission grant: a resource and the actions allowed on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    pub resource: Resource,
    pub actions: Vec<Action>,
}

impl Grant {
    pub fn new(resource: Resource, actions: &[Action]) -> Self {
        Self {
            resource,
            actions: actions.to_vec(),
        }
    }
}

/// Role model matching the `role` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RoleId>,
    /// Role name (SUPER_ADMIN, ADMIN, EDITOR, REVIEWER, USER) - unique
    pub name: String,
    pub description: String,
    /// Ordered list of grants
    #[serde(default)]
    pub permissions: Vec<Grant>,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_system: bool,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl Role {
    pub fn new(name: impl Into<String>, description: impl Into<String>, permissions: Vec<Grant>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            permissions,
            is_system: false,
            is_active: true,
        }
    }

    /// Evaluate whether this role may perform `action` on `resource`.
    ///
    /// Pure function over the already-loaded grant list; no storage access.
    /// Unknown combinations simply return false.
    pub fn has_permission(&self, resource: Resource, action: Action) -> bool {
        self.permissions.iter().any(|grant| {
            (grant.resource == resource || grant.resource == Resource::All)
                && grant.actions.contains(&action)
        })
    }
}

/// Update role request (permissions and activation only; names are fixed)
#[derive(Debug, Serialize, Deserialize)]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Grant>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Role {
        Role::new(
            "EDITOR",
            "Content creation and editing access",
            vec![
                Grant::new(
                    Resource::Reviews,
                    &[Action::Create, Action::Read, Action::Update, Action::Publish],
                ),
                Grant::new(Resource::Comments, &[Action::Read, Action::Moderate]),
                Grant::new(Resource::Categories, &[Action::Read]),
            ],
        )
    }

    #[test]
    fn test_grant_lookup() {
        let role = editor();
        assert!(role.has_permission(Resource::Reviews, Action::Publish));
        assert!(role.has_permission(Resource::Categories, Action::Read));
        assert!(!role.has_permission(Resource::Categories, Action::Create));
    }

    #[test]
    fn test_deny_by_default_for_unmentioned_resource() {
        let role = editor();
        assert!(!role.has_permission(Resource::Users, Action::Read));
        assert!(!role.has_permission(Resource::StaticPages, Action::Update));
    }

    #[test]
    fn test_wildcard_resource_covers_everything() {
        let role = Role::new(
            "SUPER_ADMIN",
            "Full system access",
            vec![Grant::new(
                Resource::All,
                &[
                    Action::Create,
                    Action::Read,
                    Action::Update,
                    Action::Delete,
                    Action::Publish,
                    Action::Moderate,
                ],
            )],
        );
        assert!(role.has_permission(Resource::Users, Action::Delete));
        assert!(role.has_permission(Resource::TechNews, Action::Publish));
    }

    #[test]
    fn test_wildcard_never_applies_to_actions() {
        // A grant on "all" with only read must not imply write access anywhere
        let role = Role::new(
            "AUDITOR",
            "Read everything",
            vec![Grant::new(Resource::All, &[Action::Read])],
        );
        assert!(role.has_permission(Resource::Reviews, Action::Read));
        assert!(!role.has_permission(Resource::Reviews, Action::Update));
        assert!(!role.has_permission(Resource::Users, Action::Delete));
    }

    #[test]
    fn test_evaluation_is_pure() {
        let role = editor();
        let first = role.has_permission(Resource::Reviews, Action::Create);
        let second = role.has_permission(Resource::Reviews, Action::Create);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resource_wire_names() {
        assert_eq!(
            serde_json::to_string(&Resource::TechNews).unwrap(),
            "\"tech-news\""
        );
        assert_eq!(
            serde_json::to_string(&Resource::StaticPages).unwrap(),
            "\"static-pages\""
        );
        assert_eq!(serde_json::to_string(&Action::Moderate).unwrap(), "\"moderate\"");
    }
}
