//! Product Review Model

use super::serde_helpers;
use super::{CategoryId, SubcategoryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub const TABLE: &str = "review";
pub const FIELDS: &[&str] = &[
    "title",
    "slug",
    "excerpt",
    "content",
    "category",
    "subcategory",
    "product_name",
    "rating",
    "pros",
    "cons",
    "verdict",
    "status",
    "published_at",
    "author",
    "created_at",
    "updated_at",
];

pub type ReviewId = RecordId;

/// Publication status shared by reviews and tech-news articles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl Default for ContentStatus {
    fn default() -> Self {
        ContentStatus::Draft
    }
}

/// Review model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ReviewId>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    #[serde(with = "serde_helpers::record_id")]
    pub category: CategoryId,
    #[serde(with = "serde_helpers::record_id")]
    pub subcategory: SubcategoryId,
    pub product_name: String,
    /// Overall rating on a 0..=10 scale
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub verdict: Option<String>,
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

/// Create review payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 300))]
    pub excerpt: String,
    #[validate(length(min = 100))]
    pub content: String,
    pub category: String,
    pub subcategory: String,
    #[validate(length(min = 1, max = 200))]
    pub product_name: String,
    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: Option<f32>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    pub verdict: Option<String>,
}

/// Update review payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviewUpdate {
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
    #[validate(length(min = 1, max = 200))]
    pub product_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pros: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cons: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ContentStatus>,
}
