//! Role Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::auth::permissions::default_roles;
use crate::db::models::{Role, RoleUpdate};
use crate::db::models::role::TABLE;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct RoleRepository {
    base: BaseRepository,
}

impl RoleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active roles
    pub async fn find_all(&self) -> RepoResult<Vec<Role>> {
        let roles: Vec<Role> = self
            .base
            .db()
            .query("SELECT * FROM role WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(roles)
    }

    /// Find role by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Role>> {
        let rid = record_id(TABLE, id)?;
        let role: Option<Role> = self.base.db().select(rid).await?;
        Ok(role)
    }

    /// Find role by name
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<Role>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM role WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let roles: Vec<Role> = result.take(0)?;
        Ok(roles.into_iter().next())
    }

    /// Create a role record
    pub async fn create(&self, role: Role) -> RepoResult<Role> {
        if self.find_by_name(&role.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Role '{}' already exists",
                role.name
            )));
        }

        let created: Option<Role> = self.base.db().create(TABLE).content(role).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create role".to_string()))
    }

    /// Update a role's description, grants or active flag
    pub async fn update(&self, id: &str, data: RoleUpdate) -> RepoResult<Role> {
        let rid = record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Role {} not found", id)))?;

        if existing.is_system && data.permissions.is_some() {
            return Err(RepoError::Validation(
                "Cannot modify permissions of a system role".to_string(),
            ));
        }

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", rid.clone()))
            .bind(("data", data))
            .await?;

        let updated: Option<Role> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Role {} not found", id)))
    }

    /// Create the default roles, skipping any that already exist.
    ///
    /// Safe to run on every startup: each role is inserted independently and
    /// existing records are never overwritten.
    pub async fn seed_default_roles(&self) -> RepoResult<usize> {
        let mut inserted = 0;
        for role in default_roles() {
            if self.find_by_name(&role.name).await?.is_none() {
                let name = role.name.clone();
                self.create(role).await?;
                tracing::info!(role = %name, "Seeded default role");
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
