//! Tech News API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;
use crate::db::models::{Action, Resource};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tech-news", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(
            Resource::TechNews,
            Action::Read,
        )));

    let create_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .layer(middleware::from_fn(require_permission(
            Resource::TechNews,
            Action::Create,
        )));

    let update_routes = Router::new()
        .route("/{id}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_permission(
            Resource::TechNews,
            Action::Update,
        )));

    let publish_routes = Router::new()
        .route("/{id}/publish", axum::routing::post(handler::publish))
        .layer(middleware::from_fn(require_permission(
            Resource::TechNews,
            Action::Publish,
        )));

    let delete_routes = Router::new()
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            Resource::TechNews,
            Action::Delete,
        )));

    read_routes
        .merge(create_routes)
        .merge(update_routes)
        .merge(publish_routes)
        .merge(delete_routes)
}
