//! Review Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::category::TABLE as CATEGORY_TABLE;
use crate::db::models::review::TABLE;
use crate::db::models::subcategory::TABLE as SUBCATEGORY_TABLE;
use crate::db::models::{ContentStatus, Review, ReviewCreate, ReviewUpdate, UserId};
use crate::utils::slug::slugify;
use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all published reviews, newest first
    pub async fn find_published(&self) -> RepoResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE status = 'published' ORDER BY published_at DESC")
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// Find all reviews regardless of status, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// Find review by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Review>> {
        let rid = record_id(TABLE, id)?;
        let review: Option<Review> = self.base.db().select(rid).await?;
        Ok(review)
    }

    /// Find review by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Review>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM review WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let reviews: Vec<Review> = result.take(0)?;
        Ok(reviews.into_iter().next())
    }

    /// Create a new review in draft status
    pub async fn create(&self, data: ReviewCreate, author: Option<UserId>) -> RepoResult<Review> {
        let category = record_id(CATEGORY_TABLE, &data.category)?;
        let subcategory = record_id(SUBCATEGORY_TABLE, &data.subcategory)?;

        let slug = slugify(&data.title);
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Review '{}' already exists",
                data.title
            )));
        }

        let now = Utc::now();
        let review = Review {
            id: None,
            title: data.title,
            slug,
            excerpt: data.excerpt,
            content: data.content,
            category,
            subcategory,
            product_name: data.product_name,
            rating: data.rating,
            pros: data.pros,
            cons: data.cons,
            verdict: data.verdict,
            status: ContentStatus::Draft,
            published_at: None,
            author,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Review> = self.base.db().create(TABLE).content(review).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    /// Update a review
    pub async fn update(&self, id: &str, data: ReviewUpdate) -> RepoResult<Review> {
        let rid = record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))?;

        let slug = match data.title {
            Some(ref new_title) if *new_title != existing.title => {
                let slug = slugify(new_title);
                if self.find_by_slug(&slug).await?.is_some() {
                    return Err(RepoError::Duplicate(format!(
                        "Review '{}' already exists",
                        new_title
                    )));
                }
                Some(slug)
            }
            _ => None,
        };

        #[derive(Serialize)]
        struct ReviewUpdateDb {
            #[serde(flatten)]
            data: ReviewUpdate,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            updated_at: chrono::DateTime<Utc>,
        }

        let update_data = ReviewUpdateDb {
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

        let updated: Option<Review> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))
    }

    /// Mark a review published and stamp the publication time
    pub async fn publish(&self, id: &str) -> RepoResult<Review> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET status = 'published', published_at = $now, updated_at = $now")
            .bind(("thing", rid.clone()))
            .bind(("now", Utc::now()))
            .await?;

        let updated: Option<Review> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))
    }

    /// Hard delete a review. Callers must run the usage guard first.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", rid))
            .await?;
        Ok(true)
    }
}
