//! Static Page API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{StaticPage, StaticPageCreate, StaticPageUpdate};
use crate::db::repository::StaticPageRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/static-pages - 获取所有页面
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<StaticPage>>> {
    let repo = StaticPageRepository::new(state.db.clone());
    let pages = repo.find_all().await?;
    Ok(Json(pages))
}

/// GET /api/static-pages/{id} - 获取单个页面
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<StaticPage>> {
    let repo = StaticPageRepository::new(state.db.clone());
    let page = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Page {} not found", id)))?;
    Ok(Json(page))
}

/// POST /api/static-pages - 创建页面
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<StaticPageCreate>,
) -> AppResult<Json<StaticPage>> {
    payload.validate()?;

    let repo = StaticPageRepository::new(state.db.clone());
    let page = repo.create(payload).await?;

    tracing::info!(user = %current_user.username, page = %page.title, "Page created");
    Ok(Json(page))
}

/// PUT /api/static-pages/{id} - 更新页面
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<StaticPageUpdate>,
) -> AppResult<Json<StaticPage>> {
    payload.validate()?;

    let repo = StaticPageRepository::new(state.db.clone());
    let page = repo
        .update(&id, payload, current_user.id.parse().ok())
        .await?;
    Ok(Json(page))
}

/// DELETE /api/static-pages/{id} - 删除页面
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = StaticPageRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    tracing::info!(user = %current_user.username, page = %id, "Page deleted");
    Ok(Json(result))
}
