//! Category API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::category::TABLE;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::db::repository::{CategoryRepository, record_id};
use crate::utils::{AppError, AppResult};

/// Query filter for category listing
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    /// If true, include inactive categories
    all: Option<bool>,
}

/// GET /api/categories - 获取所有分类
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CategoryQuery>,
) -> AppResult<Json<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = if query.all.unwrap_or(false) {
        repo.find_all_with_inactive().await?
    } else {
        repo.find_all().await?
    };
    Ok(Json(categories))
}

/// GET /api/categories/{id} - 获取单个分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {} not found", id)))?;
    Ok(Json(category))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    payload.validate()?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .create(payload, current_user.id.parse().ok())
        .await?;

    tracing::info!(
        user = %current_user.username,
        category = %category.name,
        "Category created"
    );
    Ok(Json(category))
}

/// PUT /api/categories/{id} - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    payload.validate()?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .update(&id, payload, current_user.id.parse().ok())
        .await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id} - 删除分类
///
/// 删除前先经过引用完整性守卫；仍被引用时拒绝并返回依赖明细。
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CategoryRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {} not found", id)))?;

    let rid = record_id(TABLE, &id)?;
    let usage = state.usage_guard.check_usage(TABLE, &rid.to_string()).await;

    if usage.is_used {
        return Err(AppError::DeletionBlocked {
            message: format!("Cannot delete category. It is currently: {}", usage.message),
            dependencies: serde_json::to_value(&usage.dependencies).unwrap_or_default(),
        });
    }
    if !usage.degraded.is_empty() {
        tracing::warn!(
            category = %id,
            degraded = ?usage.degraded,
            "Deleting with unverifiable usage rules"
        );
    }

    let result = repo.delete(&id).await?;

    tracing::info!(user = %current_user.username, category = %id, "Category deleted");
    Ok(Json(result))
}
