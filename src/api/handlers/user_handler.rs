//! User handlers.
//!
//! Each handler validates, calls the user service, then wraps the outcome in
//! `{ data }`. Failures leave through [`AppError`]'s envelope.
//!
//! [`AppError`]: crate::errors::AppError

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;

use crate::api::extractors::JsonPayload;
use crate::api::AppState;
use crate::domain::{DeleteResult, UpdateResult, UserResponse};
use crate::errors::AppResult;
use crate::types::ApiResponse;
use crate::validation::{CreateUserRequest, IdRequest, UpdateUserRequest};

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .put(update_user)
                .delete(delete_user),
        )
        .route("/:id", get(get_user))
}

/// List all users
#[utoipa::path(
    get,
    path = "/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every user, wrapped in `data`", body = Vec<UserResponse>),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = state.user_service.find_all().await?;
    Ok(Json(ApiResponse::new(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// Get user by ID; `data` is `null` when no user matches
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "User profile or null", body = UserResponse),
        (status = 422, description = "Malformed identifier"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Option<UserResponse>>>> {
    let id = state.validation.find_by_id(json!({ "id": id }))?;
    let user = state.user_service.find_by_id(id).await?;
    Ok(Json(ApiResponse::new(user.map(UserResponse::from))))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created", body = UserResponse),
        (status = 400, description = "Body is not JSON"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Email already taken (`MongoServerError`) or storage failure")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let input = state.validation.create(body)?;
    let user = state.user_service.create(input).await?;
    Ok(Json(ApiResponse::new(UserResponse::from(user))))
}

/// Update a user's full name and/or email
#[utoipa::path(
    put,
    path = "/v1/users",
    tag = "Users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Update applied, zero matches included", body = UpdateResult),
        (status = 400, description = "Body is not JSON"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> AppResult<Json<ApiResponse<UpdateResult>>> {
    let input = state.validation.update_by_id(body)?;
    let result = state.user_service.update_by_id(input).await?;
    Ok(Json(ApiResponse::new(result)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/v1/users",
    tag = "Users",
    request_body = IdRequest,
    responses(
        (status = 200, description = "Delete applied, zero matches included", body = DeleteResult),
        (status = 400, description = "Body is not JSON"),
        (status = 422, description = "Validation error"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> AppResult<Json<ApiResponse<DeleteResult>>> {
    let id = state.validation.delete_by_id(body)?;
    let result = state.user_service.delete_by_id(id).await?;
    Ok(Json(ApiResponse::new(result)))
}
