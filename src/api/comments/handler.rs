//! Comment API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Action, Comment, CommentCreate, CommentModerate, CommentUpdate, Resource};
use crate::db::repository::CommentRepository;
use crate::utils::{AppError, AppResult};

/// Query filter for comment listing; exactly one target is expected
#[derive(Debug, Deserialize)]
pub struct CommentQuery {
    review: Option<String>,
    tech_news: Option<String>,
}

/// GET /api/comments - 获取某条内容下的评论
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<CommentQuery>,
) -> AppResult<Json<Vec<Comment>>> {
    let repo = CommentRepository::new(state.db.clone());
    let comments = match (query.review, query.tech_news) {
        (Some(review), None) => repo.find_by_review(&review).await?,
        (None, Some(article)) => repo.find_by_tech_news(&article).await?,
        _ => {
            return Err(AppError::invalid(
                "Specify exactly one of ?review= or ?tech_news=",
            ));
        }
    };
    Ok(Json(comments))
}

/// POST /api/comments - 发表评论
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<CommentCreate>,
) -> AppResult<Json<Comment>> {
    payload.validate()?;

    let author = current_user
        .id
        .parse()
        .map_err(|_| AppError::internal("Invalid user id in auth context"))?;

    let repo = CommentRepository::new(state.db.clone());
    let comment = repo.create(payload, author).await?;
    Ok(Json(comment))
}

/// PUT /api/comments/{id} - 编辑评论
///
/// 仅作者本人可编辑，拥有 moderate 权限的角色除外。
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<CommentUpdate>,
) -> AppResult<Json<Comment>> {
    payload.validate()?;

    let repo = CommentRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Comment {} not found", id)))?;

    let is_author = existing.author.to_string() == current_user.id;
    if !is_author
        && !current_user
            .role
            .has_permission(Resource::Comments, Action::Moderate)
    {
        return Err(AppError::forbidden("You can only edit your own comments"));
    }

    let comment = repo.update(&id, payload).await?;
    Ok(Json(comment))
}

/// PUT /api/comments/{id}/moderate - 设置评论审核状态
pub async fn moderate(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<CommentModerate>,
) -> AppResult<Json<Comment>> {
    let repo = CommentRepository::new(state.db.clone());
    let comment = repo.moderate(&id, payload.status).await?;

    tracing::info!(
        user = %current_user.username,
        comment = %id,
        status = ?payload.status,
        "Comment moderated"
    );
    Ok(Json(comment))
}

/// DELETE /api/comments/{id} - 删除评论
pub async fn delete(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = CommentRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;

    tracing::info!(user = %current_user.username, comment = %id, "Comment deleted");
    Ok(Json(result))
}
