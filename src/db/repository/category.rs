//! Category Repository

use super::{BaseRepository, RepoError, RepoResult, assign_sort_order, record_id};
use crate::db::models::category::TABLE;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate, UserId};
use crate::utils::slug::slugify;
use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active categories ordered by sort_order
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category WHERE is_active = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find all categories (including inactive)
    pub async fn find_all_with_inactive(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let rid = record_id(TABLE, id)?;
        let category: Option<Category> = self.base.db().select(rid).await?;
        Ok(category)
    }

    /// Find category by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category
    pub async fn create(&self, data: CategoryCreate, created_by: Option<UserId>) -> RepoResult<Category> {
        let slug = slugify(&data.name);
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                data.name
            )));
        }

        let sort_order = assign_sort_order(self.base.db(), TABLE, data.sort_order).await?;

        let now = Utc::now();
        let category = Category {
            id: None,
            name: data.name,
            slug,
            group: data.group,
            description: data.description,
            icon: data.icon,
            image: data.image,
            color: data.color,
            sort_order,
            meta_title: data.meta_title,
            meta_description: data.meta_description,
            is_active: true,
            created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(
        &self,
        id: &str,
        data: CategoryUpdate,
        updated_by: Option<UserId>,
    ) -> RepoResult<Category> {
        let rid = record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        // Renames re-derive the slug and must not collide
        let slug = match data.name {
            Some(ref new_name) if *new_name != existing.name => {
                let slug = slugify(new_name);
                if self.find_by_slug(&slug).await?.is_some() {
                    return Err(RepoError::Duplicate(format!(
                        "Category '{}' already exists",
                        new_name
                    )));
                }
                Some(slug)
            }
            _ => None,
        };

        // Repositioning goes through the same assignment as creation
        let sort_order = match data.sort_order {
            Some(requested) if requested != existing.sort_order => {
                Some(assign_sort_order(self.base.db(), TABLE, Some(requested)).await?)
            }
            _ => None,
        };

        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(flatten)]
            data: CategoryUpdate,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            updated_by: Option<String>,
            updated_at: chrono::DateTime<Utc>,
        }

        let update_data = CategoryUpdateDb {
            data: CategoryUpdate {
                sort_order,
                ..data
            },
            slug,
            updated_by: updated_by.map(|u| u.to_string()),
            updated_at: Utc::now(),
        };

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", rid.clone()))
            .bind(("data", update_data))
            .await?;

        let updated: Option<Category> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category. Callers must run the usage guard first.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", rid))
            .await?;
        Ok(true)
    }
}
