//! Comment Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::comment::TABLE;
use crate::db::models::review::TABLE as REVIEW_TABLE;
use crate::db::models::tech_news::TABLE as TECH_NEWS_TABLE;
use crate::db::models::{Comment, CommentCreate, CommentStatus, CommentUpdate, UserId};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct CommentRepository {
    base: BaseRepository,
}

impl CommentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find approved comments on a review, oldest first
    pub async fn find_by_review(&self, review_id: &str) -> RepoResult<Vec<Comment>> {
        let rid = record_id(REVIEW_TABLE, review_id)?;
        let comments: Vec<Comment> = self
            .base
            .db()
            .query("SELECT * FROM comment WHERE review = $review AND status = 'approved' ORDER BY created_at")
            .bind(("review", rid.to_string()))
            .await?
            .take(0)?;
        Ok(comments)
    }

    /// Find approved comments on a tech-news article, oldest first
    pub async fn find_by_tech_news(&self, article_id: &str) -> RepoResult<Vec<Comment>> {
        let rid = record_id(TECH_NEWS_TABLE, article_id)?;
        let comments: Vec<Comment> = self
            .base
            .db()
            .query("SELECT * FROM comment WHERE tech_news = $article AND status = 'approved' ORDER BY created_at")
            .bind(("article", rid.to_string()))
            .await?
            .take(0)?;
        Ok(comments)
    }

    /// Find comment by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Comment>> {
        let rid = record_id(TABLE, id)?;
        let comment: Option<Comment> = self.base.db().select(rid).await?;
        Ok(comment)
    }

    /// Create a new comment
    pub async fn create(&self, data: CommentCreate, author: UserId) -> RepoResult<Comment> {
        // A comment belongs to exactly one piece of content
        let (review, tech_news) = match (&data.review, &data.tech_news) {
            (Some(review), None) => (Some(record_id(REVIEW_TABLE, review)?), None),
            (None, Some(article)) => (None, Some(record_id(TECH_NEWS_TABLE, article)?)),
            _ => {
                return Err(RepoError::Validation(
                    "A comment must reference exactly one review or tech-news article".to_string(),
                ));
            }
        };

        let parent = match data.parent {
            Some(ref parent) => {
                let rid = record_id(TABLE, parent)?;
                if self.base.db().select::<Option<Comment>>(rid.clone()).await?.is_none() {
                    return Err(RepoError::Validation(format!(
                        "Parent comment {} not found",
                        parent
                    )));
                }
                Some(rid)
            }
            None => None,
        };

        let now = Utc::now();
        let comment = Comment {
            id: None,
            content: data.content,
            author,
            review,
            tech_news,
            parent,
            status: CommentStatus::Approved,
            is_edited: false,
            edited_at: None,
            created_at: now,
            updated_at: now,
        };

        let created: Option<Comment> = self.base.db().create(TABLE).content(comment).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create comment".to_string()))
    }

    /// Update a comment's content and mark it edited
    pub async fn update(&self, id: &str, data: CommentUpdate) -> RepoResult<Comment> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Comment {} not found", id)))?;

        #[derive(serde::Serialize)]
        struct CommentUpdateDb {
            content: String,
            is_edited: bool,
            edited_at: chrono::DateTime<Utc>,
            updated_at: chrono::DateTime<Utc>,
        }

        let now = Utc::now();
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", rid.clone()))
            .bind((
                "data",
                CommentUpdateDb {
                    content: data.content,
                    is_edited: true,
                    edited_at: now,
                    updated_at: now,
                },
            ))
            .await?;

        let updated: Option<Comment> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Comment {} not found", id)))
    }

    /// Set a comment's moderation status
    pub async fn moderate(&self, id: &str, status: CommentStatus) -> RepoResult<Comment> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Comment {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET status = $status, updated_at = $now")
            .bind(("thing", rid.clone()))
            .bind(("status", status))
            .bind(("now", Utc::now()))
            .await?;

        let updated: Option<Comment> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Comment {} not found", id)))
    }

    /// Hard delete a comment
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Comment {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", rid))
            .await?;
        Ok(true)
    }
}
