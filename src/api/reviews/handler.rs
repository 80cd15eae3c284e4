//! Review API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::review::TABLE;
use crate::db::models::{Review, ReviewCreate, ReviewUpdate};
use crate::db::repository::{ReviewRepository, record_id};
use crate::utils::{AppError, AppResult};

/// Query filter for review listing
#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    /// If true, include drafts and archived reviews
    all: Option<bool>,
}

/// GET /api/reviews - 获取评测列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReviewQuery>,
) -> AppResult<Json<Vec<Review>>> {
    let repo = ReviewRepository::new(state.db.clone());
    let reviews = if query.all.unwrap_or(false) {
        repo.find_all().await?
    } else {
        repo.find_published().await?
    };
    Ok(Json(reviews))
}

/// GET /api/reviews/{id} - 获取单个评测
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Review>> {
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {} not found", id)))?;
    Ok(Json(review))
}

/// POST /api/reviews - 创建评测 (草稿)
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<Json<Review>> {
    payload.validate()?;

    let repo = ReviewRepository::new(state.db.clone());
    let review = repo.create(payload, current_user.id.parse().ok()).await?;

    tracing::info!(
        user = %current_user.username,
        review = %review.title,
        "Review created"
    );
    Ok(Json(review))
}

/// PUT /api/reviews/{id} - 更新评测
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<Json<Review>> {
    payload.validate()?;

    let repo = ReviewRepository::new(state.db.clone());
    let review = repo.update(&id, payload).await?;
    Ok(Json(review))
}

/// POST /api/reviews/{id}/publish - 发布评测
pub async fn publish(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Review>> {
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo.publish(&id).await?;

    tracing::info!(user = %current_user.username, review = %id, "Review published");
    Ok(Json(review))
}

/// DELETE /api/reviews/{id} - 删除评测
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ReviewRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {} not found", id)))?;

    let rid = record_id(TABLE, &id)?;
    let usage = state.usage_guard.check_usage(TABLE, &rid.to_string()).await;

    if usage.is_used {
        return Err(AppError::DeletionBlocked {
            message: format!("Cannot delete review. It is currently: {}", usage.message),
            dependencies: serde_json::to_value(&usage.dependencies).unwrap_or_default(),
        });
    }
    if !usage.degraded.is_empty() {
        tracing::warn!(
            review = %id,
            degraded = ?usage.degraded,
            "Deleting with unverifiable usage rules"
        );
    }

    let result = repo.delete(&id).await?;

    tracing::info!(user = %current_user.username, review = %id, "Review deleted");
    Ok(Json(result))
}
