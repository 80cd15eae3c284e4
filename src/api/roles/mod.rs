//! Role API Module
//!
//! The resource enumeration has no separate entry for roles; role
//! administration is part of user administration and shares its grants.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_permission;
use crate::core::ServerState;
use crate::db::models::{Action, Resource};

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/roles", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(
            Resource::Users,
            Action::Read,
        )));

    let write_routes = Router::new()
        .route("/{id}", axum::routing::put(handler::update))
        .layer(middleware::from_fn(require_permission(
            Resource::Users,
            Action::Update,
        )));

    read_routes.merge(write_routes)
}
