//! Tech News Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::category::TABLE as CATEGORY_TABLE;
use crate::db::models::subcategory::TABLE as SUBCATEGORY_TABLE;
use crate::db::models::tech_news::TABLE;
use crate::db::models::{ContentStatus, TechNews, TechNewsCreate, TechNewsUpdate, UserId};
use crate::utils::slug::slugify;
use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct TechNewsRepository {
    base: BaseRepository,
}

impl TechNewsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all published articles, newest first
    pub async fn find_published(&self) -> RepoResult<Vec<TechNews>> {
        let articles: Vec<TechNews> = self
            .base
            .db()
            .query("SELECT * FROM tech_news WHERE status = 'published' ORDER BY published_at DESC")
            .await?
            .take(0)?;
        Ok(articles)
    }

    /// Find all articles regardless of status, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<TechNews>> {
        let articles: Vec<TechNews> = self
            .base
            .db()
            .query("SELECT * FROM tech_news ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(articles)
    }

    /// Find article by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<TechNews>> {
        let rid = record_id(TABLE, id)?;
        let article: Option<TechNews> = self.base.db().select(rid).await?;
        Ok(article)
    }

    /// Find article by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<TechNews>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM tech_news WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let articles: Vec<TechNews> = result.take(0)?;
        Ok(articles.into_iter().next())
    }

    /// Create a new article in draft status
    pub async fn create(&self, data: TechNewsCreate, author: Option<UserId>) -> RepoResult<TechNews> {
        let category = record_id(CATEGORY_TABLE, &data.category)?;
        let subcategory = match data.subcategory {
            Some(ref sub) => Some(record_id(SUBCATEGORY_TABLE, sub)?),
            None => None,
        };

        let slug = slugify(&data.title);
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Article '{}' already exists",
                data.title
            )));
        }

        let now = Utc::now();
        let article = TechNews {
            id: None,
            title: data.title,
            slug,
            excerpt: data.excerpt,
            content: data.content,
            category,
            subcategory,
            section: data.section.unwrap_or_else(|| "general".to_string()),
            tags: data.tags,
            status: ContentStatus::Draft,
            published_at: None,
            author,
            created_at: now,
            updated_at: now,
        };

        let created: Option<TechNews> = self.base.db().create(TABLE).content(article).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create article".to_string()))
    }

    /// Update an article
    pub async fn update(&self, id: &str, data: TechNewsUpdate) -> RepoResult<TechNews> {
        let rid = record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Article {} not found", id)))?;

        let slug = match data.title {
            Some(ref new_title) if *new_title != existing.title => {
                let slug = slugify(new_title);
                if self.find_by_slug(&slug).await?.is_some() {
                    return Err(RepoError::Duplicate(format!(
                        "Article '{}' already exists",
                        new_title
                    )));
                }
                Some(slug)
            }
            _ => None,
        };

        #[derive(Serialize)]
        struct TechNewsUpdateDb {
            #[serde(flatten)]
            data: TechNewsUpdate,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            updated_at: chrono::DateTime<Utc>,
        }

        let update_data = TechNewsUpdateDb {
            data,
            slug,
            updated_at: Utc::now(),
        };

        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", rid.clone()))
            .bind(("data", update_data))
            .await?;

        let updated: Option<TechNews> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Article {} not found", id)))
    }

    /// Mark an article published and stamp the publication time
    pub async fn publish(&self, id: &str) -> RepoResult<TechNews> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Article {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET status = 'published', published_at = $now, updated_at = $now")
            .bind(("thing", rid.clone()))
            .bind(("now", Utc::now()))
            .await?;

        let updated: Option<TechNews> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Article {} not found", id)))
    }

    /// Hard delete an article. Callers must run the usage guard first.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Article {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", rid))
            .await?;
        Ok(true)
    }
}
