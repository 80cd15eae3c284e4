//! Static Page Model

use super::serde_helpers;
use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub const TABLE: &str = "static_page";
pub const FIELDS: &[&str] = &[
    "title",
    "slug",
    "page_type",
    "content",
    "meta_title",
    "meta_description",
    "is_active",
    "updated_by",
    "created_at",
    "updated_at",
];

pub type StaticPageId = RecordId;

/// Fixed page kinds a site carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    AboutUs,
    ContactUs,
    PrivacyPolicy,
    TermsOfService,
    Disclaimer,
    CookiePolicy,
    Faq,
    Careers,
    AdvertiseWithUs,
    EditorialGuidelines,
    Other,
}

/// Static page model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<StaticPageId>,
    pub title: String,
    pub slug: String,
    pub page_type: PageType,
    pub content: String,
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
    pub updated_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create static page payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StaticPageCreate {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub page_type: PageType,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(max = 150))]
    pub meta_title: Option<String>,
    #[validate(length(max = 300))]
    pub meta_description: Option<String>,
}

/// Update static page payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StaticPageUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 150))]
    pub meta_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 300))]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
