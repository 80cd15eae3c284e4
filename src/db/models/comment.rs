//! Comment Model

use super::serde_helpers;
use super::{ReviewId, TechNewsId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub const TABLE: &str = "comment";
pub const FIELDS: &[&str] = &[
    "content",
    "author",
    "review",
    "tech_news",
    "parent",
    "status",
    "is_edited",
    "edited_at",
    "created_at",
    "updated_at",
];

pub type CommentId = RecordId;

/// Moderation status of a comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    Approved,
    Pending,
    Hidden,
    Spam,
}

impl Default for CommentStatus {
    fn default() -> Self {
        CommentStatus::Approved
    }
}

/// Comment model; attached to either a review or a tech-news article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<CommentId>,
    pub content: String,
    #[serde(with = "serde_helpers::record_id")]
    pub author: UserId,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub review: Option<ReviewId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub tech_news: Option<TechNewsId>,
    /// Parent comment for threaded replies
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub parent: Option<CommentId>,
    #[serde(default)]
    pub status: CommentStatus,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_edited: bool,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create comment payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentCreate {
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
    /// Review record id this comment belongs to
    pub review: Option<String>,
    /// Tech-news record id this comment belongs to
    pub tech_news: Option<String>,
    pub parent: Option<String>,
}

/// Update comment payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentUpdate {
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

/// Moderation payload
#[derive(Debug, Clone, Deserialize)]
pub struct CommentModerate {
    pub status: CommentStatus,
}
