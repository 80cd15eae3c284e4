//! Subcategory API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::subcategory::TABLE;
use crate::db::models::{Subcategory, SubcategoryCreate, SubcategoryUpdate};
use crate::db::repository::{SubcategoryRepository, record_id};
use crate::utils::{AppError, AppResult};

/// Query filter for subcategory listing
#[derive(Debug, Deserialize)]
pub struct SubcategoryQuery {
    /// Restrict to one parent category
    category: Option<String>,
}

/// GET /api/subcategories - 获取子分类
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SubcategoryQuery>,
) -> AppResult<Json<Vec<Subcategory>>> {
    let repo = SubcategoryRepository::new(state.db.clone());
    let subcategories = match query.category {
        Some(ref category) => repo.find_by_category(category).await?,
        None => repo.find_all().await?,
    };
    Ok(Json(subcategories))
}

/// GET /api/subcategories/{id} - 获取单个子分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Subcategory>> {
    let repo = SubcategoryRepository::new(state.db.clone());
    let subcategory = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Subcategory {} not found", id)))?;
    Ok(Json(subcategory))
}

/// POST /api/subcategories - 创建子分类
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<SubcategoryCreate>,
) -> AppResult<Json<Subcategory>> {
    payload.validate()?;

    let repo = SubcategoryRepository::new(state.db.clone());
    let subcategory = repo
        .create(payload, current_user.id.parse().ok())
        .await?;

    tracing::info!(
        user = %current_user.username,
        subcategory = %subcategory.name,
        "Subcategory created"
    );
    Ok(Json(subcategory))
}

/// PUT /api/subcategories/{id} - 更新子分类
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<SubcategoryUpdate>,
) -> AppResult<Json<Subcategory>> {
    payload.validate()?;

    let repo = SubcategoryRepository::new(state.db.clone());
    let subcategory = repo
        .update(&id, payload, current_user.id.parse().ok())
        .await?;
    Ok(Json(subcategory))
}

/// DELETE /api/subcategories/{id} - 删除子分类
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = SubcategoryRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Subcategory {} not found", id)))?;

    let rid = record_id(TABLE, &id)?;
    let usage = state.usage_guard.check_usage(TABLE, &rid.to_string()).await;

    if usage.is_used {
        return Err(AppError::DeletionBlocked {
            message: format!(
                "Cannot delete subcategory. It is currently: {}",
                usage.message
            ),
            dependencies: serde_json::to_value(&usage.dependencies).unwrap_or_default(),
        });
    }
    if !usage.degraded.is_empty() {
        tracing::warn!(
            subcategory = %id,
            degraded = ?usage.degraded,
            "Deleting with unverifiable usage rules"
        );
    }

    let result = repo.delete(&id).await?;

    tracing::info!(user = %current_user.username, subcategory = %id, "Subcategory deleted");
    Ok(Json(result))
}
