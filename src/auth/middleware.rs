//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::core::ServerState;
use crate::db::models::{Action, Resource, Role};
use crate::db::repository::UserRepository;
use crate::security_log;
use crate::utils::AppError;

use super::JwtService;
use super::jwt::JwtError;

/// 当前用户上下文
///
/// Built by [`require_auth`] after the token's subject and its Role aggregate
/// are loaded from storage; downstream permission checks evaluate the role
/// value carried here, never shared state.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户记录 ID ("user:xyz")
    pub id: String,
    /// 用户名
    pub username: String,
    /// 已加载的角色聚合
    pub role: Role,
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT，加载用户及其角色，
/// 将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - `/api/auth/login` (登录接口)
/// - `/api/health` (健康检查)
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    // 公共 API 路由跳过认证
    let is_public_api_route = path == "/api/auth/login" || path == "/api/health";
    if is_public_api_route {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::Unauthorized);
        }
    };

    // 验证令牌
    let claims = match state.jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            return match e {
                JwtError::ExpiredToken => Err(AppError::TokenExpired),
                _ => Err(AppError::InvalidToken),
            };
        }
    };

    // 加载用户和角色 (令牌有效但账号可能已被停用)
    let users = UserRepository::new(state.db.clone());
    let user = users
        .find_by_id(&claims.sub)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !user.is_active {
        return Err(AppError::forbidden("Account has been disabled"));
    }

    let role: Option<Role> = state
        .db
        .select(user.role.clone())
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let role = role.ok_or_else(|| AppError::internal("Role not found"))?;

    if !role.is_active {
        return Err(AppError::forbidden("Role has been disabled"));
    }

    let current_user = CurrentUser {
        id: claims.sub,
        username: user.username,
        role,
    };
    req.extensions_mut().insert(current_user);
    Ok(next.run(req).await)
}

/// 权限检查中间件 - 要求特定 (资源, 操作) 授权
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/categories", get(handler::list))
///     .layer(middleware::from_fn(require_permission(
///         Resource::Categories,
///         Action::Read,
///     )));
/// ```
///
/// # 错误
///
/// 无权限返回 403 Forbidden
pub fn require_permission(
    resource: Resource,
    action: Action,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::Unauthorized)?;

            if !user.role.has_permission(resource, action) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id.clone(),
                    username = user.username.clone(),
                    role = user.role.name.clone(),
                    required = format!("{} on {}", action, resource)
                );
                return Err(AppError::forbidden(format!(
                    "Missing permission: {} on {}",
                    action, resource
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
