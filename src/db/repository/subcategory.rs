//! Subcategory Repository

use super::{BaseRepository, RepoError, RepoResult, assign_sort_order, record_id};
use crate::db::models::category::TABLE as CATEGORY_TABLE;
use crate::db::models::subcategory::TABLE;
use crate::db::models::{Subcategory, SubcategoryCreate, SubcategoryUpdate, UserId};
use crate::utils::slug::slugify;
use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct SubcategoryRepository {
    base: BaseRepository,
}

impl SubcategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active subcategories ordered by sort_order
    pub async fn find_all(&self) -> RepoResult<Vec<Subcategory>> {
        let subcategories: Vec<Subcategory> = self
            .base
            .db()
            .query("SELECT * FROM subcategory WHERE is_active = true ORDER BY sort_order")
            .await?
            .take(0)?;
        Ok(subcategories)
    }

    /// Find active subcategories of one category
    pub async fn find_by_category(&self, category_id: &str) -> RepoResult<Vec<Subcategory>> {
        let rid = record_id(CATEGORY_TABLE, category_id)?;
        let subcategories: Vec<Subcategory> = self
            .base
            .db()
            .query("SELECT * FROM subcategory WHERE category = $category AND is_active = true ORDER BY sort_order")
            .bind(("category", rid.to_string()))
            .await?
            .take(0)?;
        Ok(subcategories)
    }

    /// Find subcategory by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Subcategory>> {
        let rid = record_id(TABLE, id)?;
        let subcategory: Option<Subcategory> = self.base.db().select(rid).await?;
        Ok(subcategory)
    }

    /// Find subcategory by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Subcategory>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM subcategory WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let subcategories: Vec<Subcategory> = result.take(0)?;
        Ok(subcategories.into_iter().next())
    }

    /// Create a new subcategory
    pub async fn create(
        &self,
        data: SubcategoryCreate,
        created_by: Option<UserId>,
    ) -> RepoResult<Subcategory> {
        let category = record_id(CATEGORY_TABLE, &data.category)?;

        // Parent must exist
        let parent: Option<crate::db::models::Category> =
            self.base.db().select(category.clone()).await?;
        if parent.is_none() {
            return Err(RepoError::Validation(format!(
                "Parent category {} not found",
                data.category
            )));
        }

        let slug = slugify(&data.name);
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Subcategory '{}' already exists",
                data.name
            )));
        }

        let sort_order = assign_sort_order(self.base.db(), TABLE, data.sort_order).await?;

        let now = Utc::now();
        let subcategory = Subcategory {
            id: None,
            name: data.name,
            slug,
            description: data.description,
            category,
            icon: data.icon,
            image: data.image,
            sort_order,
            meta_title: data.meta_title,
            meta_description: data.meta_description,
            is_active: true,
            created_by,
            updated_by: None,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Subcategory> =
            self.base.db().create(TABLE).content(subcategory).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create subcategory".to_string()))
    }

    /// Update a subcategory
    pub async fn update(
        &self,
        id: &str,
        data: SubcategoryUpdate,
        updated_by: Option<UserId>,
    ) -> RepoResult<Subcategory> {
        let rid = record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Subcategory {} not found", id)))?;

        let slug = match data.name {
            Some(ref new_name) if *new_name != existing.name => {
                let slug = slugify(new_name);
                if self.find_by_slug(&slug).await?.is_some() {
                    return Err(RepoError::Duplicate(format!(
                        "Subcategory '{}' already exists",
                        new_name
                    )));
                }
                Some(slug)
            }
            _ => None,
        };

        let sort_order = match data.sort_order {
            Some(requested) if requested != existing.sort_order => {
                Some(assign_sort_order(self.base.db(), TABLE, Some(requested)).await?)
            }
            _ => None,
        };

        #[derive(Serialize)]
        struct SubcategoryUpdateDb {
            #[serde(flatten)]
            data: SubcategoryUpdate,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            updated_by: Option<String>,
            updated_at: chrono::DateTime<Utc>,
        }

        let update_data = SubcategoryUpdateDb {
            data: SubcategoryUpdate {
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

        let updated: Option<Subcategory> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Subcategory {} not found", id)))
    }

    /// Hard delete a subcategory. Callers must run the usage guard first.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Subcategory {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", rid))
            .await?;
        Ok(true)
    }
}
