//! User handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};

use common::AppResult;
use domain::{Credentials, RegisterUser, UpdateUser, UserResponse, ENTITY_USER};

use super::parse_id;
use crate::extractors::JsonBody;
use crate::response::{created, ApiResponse, Created};
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/registro", post(register))
        .route("/login", post(login))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/users/registro",
    tag = "Users",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered; envelope data holds the user", body = UserResponse),
        (status = 400, description = "Missing fields, password mismatch, short password or email taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterUser>,
) -> AppResult<Created<UserResponse>> {
    let user = state.users.register(payload).await?;
    Ok(created("User registered successfully", UserResponse::from(user)))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/users/login",
    tag = "Users",
    request_body = Credentials,
    responses(
        (status = 200, description = "Welcome message; envelope data holds the user", body = UserResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Email or password incorrect")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<Credentials>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = state.users.login(payload).await?;
    let message = user.welcome_message();
    Ok(Json(ApiResponse::with_data(message, UserResponse::from(user))))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let id = parse_id(&id, ENTITY_USER)?;
    let user = state.users.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the supplied fields of a user
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated; envelope data holds the user", body = UserResponse),
        (status = 400, description = "Validation error or email taken"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateUser>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let id = parse_id(&id, ENTITY_USER)?;
    let user = state.users.update_user(id, payload).await?;
    Ok(Json(ApiResponse::with_data(
        "User updated successfully",
        UserResponse::from(user),
    )))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&id, ENTITY_USER)?;
    state.users.delete_user(id).await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}
