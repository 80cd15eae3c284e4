//! Database Models
//!
//! One module per table. Each module also exposes its `TABLE` name and the
//! `FIELDS` list; the fields double as the source of truth the usage-rule
//! table is validated against at startup.

pub mod serde_helpers;

pub mod category;
pub mod comment;
pub mod review;
pub mod role;
pub mod static_page;
pub mod subcategory;
pub mod tech_news;
pub mod user;

pub use category::{Category, CategoryCreate, CategoryId, CategoryUpdate};
pub use comment::{Comment, CommentCreate, CommentId, CommentModerate, CommentStatus, CommentUpdate};
pub use review::{ContentStatus, Review, ReviewCreate, ReviewId, ReviewUpdate};
pub use role::{Action, Grant, Resource, Role, RoleId, RoleUpdate};
pub use static_page::{PageType, StaticPage, StaticPageCreate, StaticPageId, StaticPageUpdate};
pub use subcategory::{Subcategory, SubcategoryCreate, SubcategoryId, SubcategoryUpdate};
pub use tech_news::{TechNews, TechNewsCreate, TechNewsId, TechNewsUpdate};
pub use user::{User, UserCreate, UserId, UserUpdate};

/// Field metadata for a table, used to validate the usage-rule table.
pub fn table_fields(table: &str) -> Option<&'static [&'static str]> {
    match table {
        role::TABLE => Some(role::FIELDS),
        user::TABLE => Some(user::FIELDS),
        category::TABLE => Some(category::FIELDS),
        subcategory::TABLE => Some(subcategory::FIELDS),
        review::TABLE => Some(review::FIELDS),
        tech_news::TABLE => Some(tech_news::FIELDS),
        comment::TABLE => Some(comment::FIELDS),
        static_page::TABLE => Some(static_page::FIELDS),
        _ => None,
    }
}
