//! Database Module
//!
//! Embedded SurrealDB: connection, schema/index definition, startup seeding.

pub mod models;
pub mod repository;
pub mod usage;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::core::Config;
use crate::utils::AppError;
use repository::{RoleRepository, StaticPageRepository, UserRepository};

const NAMESPACE: &str = "techpress";
const DATABASE: &str = "cms";

/// Unique indexes declared up front. The sort_order indexes turn the
/// check-then-insert window in sort-order assignment into a storage-level
/// conflict instead of a silent duplicate.
const SCHEMA: &str = "
    DEFINE INDEX IF NOT EXISTS role_name ON TABLE role FIELDS name UNIQUE;
    DEFINE INDEX IF NOT EXISTS user_username ON TABLE user FIELDS username UNIQUE;
    DEFINE INDEX IF NOT EXISTS user_email ON TABLE user FIELDS email UNIQUE;
    DEFINE INDEX IF NOT EXISTS category_slug ON TABLE category FIELDS slug UNIQUE;
    DEFINE INDEX IF NOT EXISTS category_sort ON TABLE category FIELDS sort_order UNIQUE;
    DEFINE INDEX IF NOT EXISTS subcategory_slug ON TABLE subcategory FIELDS slug UNIQUE;
    DEFINE INDEX IF NOT EXISTS subcategory_sort ON TABLE subcategory FIELDS sort_order UNIQUE;
    DEFINE INDEX IF NOT EXISTS review_slug ON TABLE review FIELDS slug UNIQUE;
    DEFINE INDEX IF NOT EXISTS tech_news_slug ON TABLE tech_news FIELDS slug UNIQUE;
    DEFINE INDEX IF NOT EXISTS static_page_slug ON TABLE static_page FIELDS slug UNIQUE;
";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the database, declare indexes, validate the usage-rule table and
    /// run the idempotent seeds. A database path of ":memory:" opens the
    /// in-memory engine (used by tests).
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let db = if config.database_path == ":memory:" {
            Surreal::new::<Mem>(())
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?
        } else {
            Surreal::new::<RocksDb>(config.database_path.as_str())
                .await
                .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?
        };

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?;

        tracing::info!(path = %config.database_path, "Database connection established");

        // A rule pointing at a renamed table or field would silently count
        // zero forever; refuse to start instead.
        usage::validate_rules(usage::USAGE_RULES)
            .map_err(|e| AppError::internal(format!("Usage rule table invalid: {}", e)))?;

        let service = Self { db };
        service.seed(config).await?;
        Ok(service)
    }

    /// Idempotent startup seeding: default roles, default static pages and,
    /// on first boot only, the bootstrap admin account.
    async fn seed(&self, config: &Config) -> Result<(), AppError> {
        let roles = RoleRepository::new(self.db.clone());
        roles.seed_default_roles().await?;

        let pages = StaticPageRepository::new(self.db.clone());
        pages.seed_default_pages().await?;

        let users = UserRepository::new(self.db.clone());
        if users.count().await? == 0 {
            match &config.admin_password {
                Some(password) => {
                    let super_admin = roles
                        .find_by_name("SUPER_ADMIN")
                        .await?
                        .and_then(|r| r.id)
                        .ok_or_else(|| AppError::internal("SUPER_ADMIN role missing after seed"))?;

                    users
                        .create(models::UserCreate {
                            username: "admin".to_string(),
                            email: "admin@localhost".to_string(),
                            password: password.clone(),
                            first_name: None,
                            last_name: None,
                            role: super_admin.to_string(),
                            bio: None,
                        })
                        .await?;
                    tracing::info!("Bootstrap admin account created");
                }
                None => {
                    tracing::warn!(
                        "No users exist and ADMIN_PASSWORD is not set; no account can log in"
                    );
                }
            }
        }

        Ok(())
    }
}
