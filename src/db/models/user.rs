//! User Model

use super::RoleId;
use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

pub const TABLE: &str = "user";
pub const FIELDS: &[&str] = &[
    "username",
    "email",
    "first_name",
    "last_name",
    "hash_pass",
    "role",
    "bio",
    "is_active",
    "created_at",
    "updated_at",
];

/// User ID type
pub type UserId = RecordId;

/// User model matching the `user` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<UserId>,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(skip_serializing)]
    pub hash_pass: String,
    #[serde(with = "serde_helpers::record_id")]
    pub role: RoleId,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// Create user payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 3, max = 30))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Role record id, e.g. "role:editor"
    pub role: String,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
}

/// Update user payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub role: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    pub is_active: Option<bool>,
}
