//! Static Page Repository

use super::{BaseRepository, RepoError, RepoResult, record_id};
use crate::db::models::static_page::TABLE;
use crate::db::models::{PageType, StaticPage, StaticPageCreate, StaticPageUpdate, UserId};
use crate::utils::slug::slugify;
use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct StaticPageRepository {
    base: BaseRepository,
}

impl StaticPageRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active pages
    pub async fn find_all(&self) -> RepoResult<Vec<StaticPage>> {
        let pages: Vec<StaticPage> = self
            .base
            .db()
            .query("SELECT * FROM static_page WHERE is_active = true ORDER BY title")
            .await?
            .take(0)?;
        Ok(pages)
    }

    /// Find page by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<StaticPage>> {
        let rid = record_id(TABLE, id)?;
        let page: Option<StaticPage> = self.base.db().select(rid).await?;
        Ok(page)
    }

    /// Find page by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<StaticPage>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM static_page WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let pages: Vec<StaticPage> = result.take(0)?;
        Ok(pages.into_iter().next())
    }

    /// Create a new page
    pub async fn create(&self, data: StaticPageCreate) -> RepoResult<StaticPage> {
        let slug = slugify(&data.title);
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Page '{}' already exists",
                data.title
            )));
        }

        let now = Utc::now();
        let page = StaticPage {
            id: None,
            title: data.title,
            slug,
            page_type: data.page_type,
            content: data.content,
            meta_title: data.meta_title,
            meta_description: data.meta_description,
            is_active: true,
            updated_by: None,
            created_at: now,
            updated_at: now,
        };

        let created: Option<StaticPage> = self.base.db().create(TABLE).content(page).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create page".to_string()))
    }

    /// Update a page
    pub async fn update(
        &self,
        id: &str,
        data: StaticPageUpdate,
        updated_by: Option<UserId>,
    ) -> RepoResult<StaticPage> {
        let rid = record_id(TABLE, id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Page {} not found", id)))?;

        let slug = match data.title {
            Some(ref new_title) if *new_title != existing.title => {
                let slug = slugify(new_title);
                if self.find_by_slug(&slug).await?.is_some() {
                    return Err(RepoError::Duplicate(format!(
                        "Page '{}' already exists",
                        new_title
                    )));
                }
                Some(slug)
            }
            _ => None,
        };

        #[derive(Serialize)]
        struct StaticPageUpdateDb {
            #[serde(flatten)]
            data: StaticPageUpdate,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            updated_by: Option<String>,
            updated_at: chrono::DateTime<Utc>,
        }

        let update_data = StaticPageUpdateDb {
            data,
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

        let updated: Option<StaticPage> = self.base.db().select(rid).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Page {} not found", id)))
    }

    /// Hard delete a page
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = record_id(TABLE, id)?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Page {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", rid))
            .await?;
        Ok(true)
    }

    /// Create the default page set, skipping any that already exist
    pub async fn seed_default_pages(&self) -> RepoResult<usize> {
        let defaults = [
            (
                "About Us",
                PageType::AboutUs,
                "Learn more about our tech review platform and our mission to provide comprehensive technology reviews.",
            ),
            (
                "Contact Us",
                PageType::ContactUs,
                "Get in touch with our team for any questions or suggestions.",
            ),
            (
                "Privacy Policy",
                PageType::PrivacyPolicy,
                "How we collect, use and protect your data.",
            ),
            (
                "Terms of Service",
                PageType::TermsOfService,
                "The terms that govern your use of this site.",
            ),
            (
                "FAQ",
                PageType::Faq,
                "Frequently asked questions about our reviews and ratings.",
            ),
        ];

        let mut inserted = 0;
        for (title, page_type, content) in defaults {
            if self.find_by_slug(&slugify(title)).await?.is_none() {
                self.create(StaticPageCreate {
                    title: title.to_string(),
                    page_type,
                    content: content.to_string(),
                    meta_title: None,
                    meta_description: None,
                })
                .await?;
                tracing::info!(page = title, "Seeded default static page");
                inserted += 1;
            }
        }
        Ok(inserted)
    }
}
