use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Mount the `/users` routes on `router`, sharing `service` with the handlers.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        // GET /users - List users, POST /users - Create a user
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        // GET /users/{id} - Get a specific user
        .route("/users/{id}", get(handlers::get_user))
        .layer(Extension(service))
}
