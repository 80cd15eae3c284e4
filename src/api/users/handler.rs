//! User API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{User, UserCreate, UserUpdate};
use crate::db::repository::UserRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/users - 获取所有用户
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<User>>> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.find_all().await?;
    Ok(Json(users))
}

/// GET /api/users/{id} - 获取单个用户
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", id)))?;
    Ok(Json(user))
}

/// POST /api/users - 创建用户
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<UserCreate>,
) -> AppResult<Json<User>> {
    payload.validate()?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.create(payload).await?;

    tracing::info!(
        operator = %current_user.username,
        user = %user.username,
        "User created"
    );
    Ok(Json(user))
}

/// PUT /api/users/{id} - 更新用户
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<UserUpdate>,
) -> AppResult<Json<User>> {
    payload.validate()?;

    let repo = UserRepository::new(state.db.clone());
    let user = repo.update(&id, payload).await?;

    tracing::info!(operator = %current_user.username, user = %id, "User updated");
    Ok(Json(user))
}

/// DELETE /api/users/{id} - 删除用户
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    // 不允许删除自己，避免管理员把最后一个账号删掉
    let target = crate::db::repository::record_id(crate::db::models::user::TABLE, &id)?;
    if target.to_string() == current_user.id {
        return Err(AppError::invalid("You cannot delete your own account"));
    }

    let repo = UserRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    tracing::info!(operator = %current_user.username, user = %id, "User deleted");
    Ok(Json(result))
}
