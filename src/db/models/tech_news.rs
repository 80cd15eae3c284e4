//! Tech News Model

use super::review::ContentStatus;
use super::serde_helpers;
use super::{CategoryId, SubcategoryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub const TABLE: &str = "tech_news";
pub const FIELDS: &[&str] = &[
    "title",
    "slug",
    "excerpt",
    "content",
    "category",
    "subcategory",
    "section",
    "tags",
    "status",
    "published_at",
    "author",
    "created_at",
    "updated_at",
];

pub type TechNewsId = RecordId;

/// Tech news article model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechNews {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<TechNewsId>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    #[serde(with = "serde_helpers::record_id")]
    pub category: CategoryId,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub subcategory: Option<SubcategoryId>,
    /// Editorial section, e.g. "launch-events", "ai-news", "mobile-news"
    #[serde(default = "default_section")]
    pub section: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub status: ContentStatus,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub author: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_section() -> String {
    "general".to_string()
}

/// Create tech news payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TechNewsCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 300))]
    pub excerpt: String,
    #[validate(length(min = 100))]
    pub content: String,
    pub category: String,
    pub subcategory: Option<String>,
    pub section: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Update tech news payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TechNewsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 300))]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 100))]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContentStatus>,
}
