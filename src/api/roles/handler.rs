//! Role API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Role, RoleUpdate};
use crate::db::repository::RoleRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/roles - Get all roles
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Role>>> {
    let repo = RoleRepository::new(state.db.clone());
    let roles = repo.find_all().await?;
    Ok(Json(roles))
}

/// GET /api/roles/{id} - Get role by ID
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Role>> {
    let repo = RoleRepository::new(state.db.clone());
    let role = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Role {} not found", id)))?;
    Ok(Json(role))
}

/// PUT /api/roles/{id} - Update a role's grants
///
/// 权限天花板校验：操作者只能授予自己拥有的权限
pub async fn update(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<RoleUpdate>,
) -> AppResult<Json<Role>> {
    if let Some(ref grants) = payload.permissions {
        for grant in grants {
            for action in &grant.actions {
                if !current_user.role.has_permission(grant.resource, *action) {
                    return Err(AppError::forbidden(format!(
                        "Cannot grant permission '{} on {}': you do not have it yourself",
                        action, grant.resource
                    )));
                }
            }
        }
    }

    let repo = RoleRepository::new(state.db.clone());
    let role = repo.update(&id, payload).await?;

    tracing::info!(
        operator = %current_user.username,
        role = %role.name,
        "Role updated"
    );
    Ok(Json(role))
}
