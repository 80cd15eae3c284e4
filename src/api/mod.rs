//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`users`] - 用户管理接口
//! - [`roles`] - 角色管理接口
//! - [`categories`] - 分类管理接口
//! - [`subcategories`] - 子分类管理接口
//! - [`reviews`] - 产品评测接口
//! - [`tech_news`] - 科技新闻接口
//! - [`comments`] - 评论接口
//! - [`static_pages`] - 静态页面接口

pub mod auth;
pub mod categories;
pub mod comments;
pub mod health;
pub mod reviews;
pub mod roles;
pub mod static_pages;
pub mod subcategories;
pub mod tech_news;
pub mod users;

use axum::Router;

use crate::core::ServerState;

/// 组装全部 API 路由
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(roles::router())
        .merge(categories::router())
        .merge(subcategories::router())
        .merge(reviews::router())
        .merge(tech_news::router())
        .merge(comments::router())
        .merge(static_pages::router())
}
