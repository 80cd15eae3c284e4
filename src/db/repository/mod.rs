//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables, one repository per
//! table sharing [`BaseRepository`].

pub mod category;
pub mod comment;
pub mod review;
pub mod role;
pub mod static_page;
pub mod subcategory;
pub mod tech_news;
pub mod user;

pub use category::CategoryRepository;
pub use comment::CommentRepository;
pub use review::ReviewRepository;
pub use role::RoleRepository;
pub use static_page::StaticPageRepository;
pub use subcategory::SubcategoryRepository;
pub use tech_news::TechNewsRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Sort order {value} already exists for \"{holder}\". Please choose a different one.")]
    SortConflict { value: i32, holder: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            conflict @ RepoError::SortConflict { .. } => AppError::Conflict(conflict.to_string()),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Parse an incoming id that may be either a bare key ("abc") or the full
/// "table:key" form into a RecordId for `table`.
pub fn record_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.contains(':') {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if rid.table() != table {
            return Err(RepoError::Validation(format!(
                "ID '{}' does not belong to table '{}'",
                id, table
            )));
        }
        Ok(rid)
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}

/// Assign a position value for a new or repositioned record in `table`.
///
/// No requested value: the current maximum plus one (1 for an empty table).
/// An explicit value is used as-is unless another record already holds it, in
/// which case the conflict names the holder and nothing is renumbered. The
/// check-then-insert window is closed by the unique index on `sort_order`
/// declared at startup; an index violation surfaces as a storage conflict.
pub async fn assign_sort_order(
    db: &Surreal<Db>,
    table: &'static str,
    requested: Option<i32>,
) -> RepoResult<i32> {
    match requested {
        None => {
            let mut result = db
                .query(format!(
                    "SELECT sort_order FROM {} ORDER BY sort_order DESC LIMIT 1",
                    table
                ))
                .await?;
            let max: Option<i32> = result.take((0, "sort_order"))?;
            Ok(max.map_or(1, |m| m + 1))
        }
        Some(value) => {
            let mut result = db
                .query(format!(
                    "SELECT name FROM {} WHERE sort_order = $value LIMIT 1",
                    table
                ))
                .bind(("value", value))
                .await?;
            let holder: Option<String> = result.take((0, "name"))?;
            match holder {
                Some(name) => Err(RepoError::SortConflict {
                    value,
                    holder: name,
                }),
                None => Ok(value),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surrealdb::engine::local::Mem;

    async fn mem_db() -> Surreal<Db> {
        let db = Surreal::new::<Mem>(()).await.expect("mem engine");
        db.use_ns("test").use_db("test").await.expect("ns/db");
        db
    }

    #[tokio::test]
    async fn test_sort_order_starts_at_one() {
        let db = mem_db().await;
        assert_eq!(assign_sort_order(&db, "category", None).await.unwrap(), 1);
        // Nothing was persisted, so the answer does not change
        assert_eq!(assign_sort_order(&db, "category", None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_sort_order_appends_after_max() {
        let db = mem_db().await;
        db.query("CREATE category SET name = 'Phones', sort_order = 1")
            .await
            .unwrap();
        assert_eq!(assign_sort_order(&db, "category", None).await.unwrap(), 2);

        db.query("CREATE category SET name = 'Laptops', sort_order = 7")
            .await
            .unwrap();
        // Gaps are tolerated; next value follows the maximum
        assert_eq!(assign_sort_order(&db, "category", None).await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_explicit_sort_order_conflicts() {
        let db = mem_db().await;
        db.query("CREATE category SET name = 'Phones', sort_order = 5")
            .await
            .unwrap();

        let err = assign_sort_order(&db, "category", Some(5)).await.unwrap_err();
        match err {
            RepoError::SortConflict { value, holder } => {
                assert_eq!(value, 5);
                assert_eq!(holder, "Phones");
            }
            other => panic!("expected SortConflict, got {other:?}"),
        }

        // A free value passes through untouched
        assert_eq!(assign_sort_order(&db, "category", Some(6)).await.unwrap(), 6);
    }

    #[test]
    fn test_record_id_accepts_both_forms() {
        let bare = record_id("category", "abc123").unwrap();
        assert_eq!(bare.to_string(), "category:abc123");

        let full = record_id("category", "category:abc123").unwrap();
        assert_eq!(full, bare);

        assert!(record_id("category", "review:abc123").is_err());
    }
}
