//! Tech News API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::tech_news::TABLE;
use crate::db::models::{TechNews, TechNewsCreate, TechNewsUpdate};
use crate::db::repository::{TechNewsRepository, record_id};
use crate::utils::{AppError, AppResult};

/// Query filter for article listing
#[derive(Debug, Deserialize)]
pub struct TechNewsQuery {
    /// If true, include drafts and archived articles
    all: Option<bool>,
}

/// GET /api/tech-news - 获取新闻列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<TechNewsQuery>,
) -> AppResult<Json<Vec<TechNews>>> {
    let repo = TechNewsRepository::new(state.db.clone());
    let articles = if query.all.unwrap_or(false) {
        repo.find_all().await?
    } else {
        repo.find_published().await?
    };
    Ok(Json(articles))
}

/// GET /api/tech-news/{id} - 获取单篇新闻
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TechNews>> {
    let repo = TechNewsRepository::new(state.db.clone());
    let article = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Article {} not found", id)))?;
    Ok(Json(article))
}

/// POST /api/tech-news - 创建新闻 (草稿)
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<TechNewsCreate>,
) -> AppResult<Json<TechNews>> {
    payload.validate()?;

    let repo = TechNewsRepository::new(state.db.clone());
    let article = repo.create(payload, current_user.id.parse().ok()).await?;

    tracing::info!(
        user = %current_user.username,
        article = %article.title,
        "Article created"
    );
    Ok(Json(article))
}

/// PUT /api/tech-news/{id} - 更新新闻
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TechNewsUpdate>,
) -> AppResult<Json<TechNews>> {
    payload.validate()?;

    let repo = TechNewsRepository::new(state.db.clone());
    let article = repo.update(&id, payload).await?;
    Ok(Json(article))
}

/// POST /api/tech-news/{id}/publish - 发布新闻
pub async fn publish(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<TechNews>> {
    let repo = TechNewsRepository::new(state.db.clone());
    let article = repo.publish(&id).await?;

    tracing::info!(user = %current_user.username, article = %id, "Article published");
    Ok(Json(article))
}

/// DELETE /api/tech-news/{id} - 删除新闻
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = TechNewsRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Article {} not found", id)))?;

    let rid = record_id(TABLE, &id)?;
    let usage = state.usage_guard.check_usage(TABLE, &rid.to_string()).await;

    if usage.is_used {
        return Err(AppError::DeletionBlocked {
            message: format!("Cannot delete article. It is currently: {}", usage.message),
            dependencies: serde_json::to_value(&usage.dependencies).unwrap_or_default(),
        });
    }
    if !usage.degraded.is_empty() {
        tracing::warn!(
            article = %id,
            degraded = ?usage.degraded,
            "Deleting with unverifiable usage rules"
        );
    }

    let result = repo.delete(&id).await?;

    tracing::info!(user = %current_user.username, article = %id, "Article deleted");
    Ok(Json(result))
}
