//! Subcategory Model

use super::serde_helpers;
use super::{CategoryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub const TABLE: &str = "subcategory";
pub const FIELDS: &[&str] = &[
    "name",
    "slug",
    "description",
    "category",
    "icon",
    "image",
    "sort_order",
    "meta_title",
    "meta_description",
    "is_active",
    "created_by",
    "updated_by",
    "created_at",
    "updated_at",
];

pub type SubcategoryId = RecordId;

/// Subcategory model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcategory {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<SubcategoryId>,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Parent category reference
    #[serde(with = "serde_helpers::record_id")]
    pub category: CategoryId,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub created_by: Option<UserId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub updated_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create subcategory payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubcategoryCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    /// Parent category record id, e.g. "category:xyz"
    pub category: String,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub sort_order: Option<i32>,
    #[validate(length(max = 150))]
    pub meta_title: Option<String>,
    #[validate(length(max = 300))]
    pub meta_description: Option<String>,
}

/// Update subcategory payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubcategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 150))]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 300))]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
