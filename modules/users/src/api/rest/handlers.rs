use std::sync::Arc;

use axum::{http::StatusCode, response::Json, Extension};
use jsonapi_kit::{ErrorDocumentResponse, Filters, JsonApiPath, ValidatedJson};
use tracing::{error, info};

use crate::api::rest::dto::{CreateUserReq, UserDto};
use crate::api::rest::error::map_domain_error;
use crate::domain::service::Service;

/// List users, narrowed by `filter[...]` query parameters
pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    Filters(filters): Filters,
) -> Json<Vec<UserDto>> {
    info!("Listing users with {} filter attribute(s)", filters.len());

    let users = svc.list_users(&filters);
    Json(users.into_iter().map(UserDto::from).collect())
}

/// Get a specific user by ID
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    JsonApiPath(id): JsonApiPath<u64>,
) -> Result<Json<UserDto>, ErrorDocumentResponse> {
    info!("Getting user with id: {}", id);

    match svc.get_user(id) {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Create a new user
pub async fn create_user(
    Extension(svc): Extension<Arc<Service>>,
    ValidatedJson(req): ValidatedJson<CreateUserReq>,
) -> Result<(StatusCode, Json<UserDto>), ErrorDocumentResponse> {
    info!("Creating user: {:?}", req);

    match svc.create_user(req.into()) {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e))
        }
    }
}
