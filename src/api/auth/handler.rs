//! Authentication Handlers
//!
//! Handles login and current-user introspection

use std::time::Duration;

use axum::{Json, extract::{Extension, State}};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Grant, Role};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_name: String,
    pub permissions: Vec<Grant>,
    pub is_active: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// POST /api/auth/login - Authenticate and return a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let users = UserRepository::new(state.db.clone());
    let user = users.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let user = match user {
        Some(u) => {
            if !u.is_active {
                return Err(AppError::forbidden("Account has been disabled"));
            }

            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(username = %req.username, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(username = %req.username, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    // Fetch role information
    let role: Option<Role> = state
        .db
        .select(user.role.clone())
        .await
        .map_err(|e| AppError::database(format!("Failed to query role: {}", e)))?;
    let role = role.ok_or_else(|| AppError::internal("Role not found"))?;

    if !role.is_active {
        return Err(AppError::forbidden("Role has been disabled"));
    }

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();

    let token = state
        .jwt_service
        .generate_token(&user_id, &user.username, &role.name)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user_id,
        username = %user.username,
        role = %role.name,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: UserInfo {
            id: user_id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role_name: role.name,
            permissions: role.permissions,
            is_active: user.is_active,
        },
    }))
}

/// GET /api/auth/me - Get current user info
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let users = UserRepository::new(state.db.clone());
    let user = users
        .find_by_id(&current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserInfo {
        id: current_user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        role_name: current_user.role.name,
        permissions: current_user.role.permissions,
        is_active: user.is_active,
    }))
}

/// POST /api/auth/logout - Log the logout; tokens expire on their own
pub async fn logout(Extension(current_user): Extension<CurrentUser>) -> AppResult<Json<()>> {
    tracing::info!(
        user_id = %current_user.id,
        username = %current_user.username,
        "User logged out"
    );
    Ok(Json(()))
}
