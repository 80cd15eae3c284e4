//! Comment API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;
use crate::db::models::{Action, Resource};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/comments", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .layer(middleware::from_fn(require_permission(
            Resource::Comments,
            Action::Read,
        )));

    let create_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .layer(middleware::from_fn(require_permission(
            Resource::Comments,
            Action::Create,
        )));

    let update_routes = Router::new()
        .route("/{id}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_permission(
            Resource::Comments,
            Action::Update,
        )));

    let moderate_routes = Router::new()
        .route("/{id}/moderate", axum::routing::put(handler::moderate))
        .layer(middleware::from_fn(require_permission(
            Resource::Comments,
            Action::Moderate,
        )));

    let delete_routes = Router::new()
        .route("/{id}", axum::routing::delete(handler::delete))
        .layer(middleware::from_fn(require_permission(
            Resource::Comments,
            Action::Delete,
        )));

    read_routes
        .merge(create_routes)
        .merge(update_routes)
        .merge(moderate_routes)
        .merge(delete_routes)
}
