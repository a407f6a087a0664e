//! License handlers.
//!
//! License payloads are returned as stored, hash included.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use domain::{CreateLicense, License, UpdateLicense, ENTITY_LICENSE};

use super::parse_id;
use crate::extractors::JsonBody;
use crate::response::{created, ApiResponse, Created};
use crate::state::AppState;

/// Create license routes
pub fn license_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_licenses).post(create_license))
        .route(
            "/:id",
            get(get_license)
                .patch(update_license)
                .delete(delete_license),
        )
}

/// List all licenses
#[utoipa::path(
    get,
    path = "/api/licencias",
    tag = "Licenses",
    responses(
        (status = 200, description = "List of all licenses", body = Vec<License>)
    )
)]
pub async fn list_licenses(State(state): State<AppState>) -> AppResult<Json<Vec<License>>> {
    Ok(Json(state.licenses.list_licenses().await?))
}

/// Create a license
#[utoipa::path(
    post,
    path = "/api/licencias",
    tag = "Licenses",
    request_body = CreateLicense,
    responses(
        (status = 201, description = "License created; envelope data holds the license", body = License),
        (status = 400, description = "Missing fields, password mismatch, or license number or email taken")
    )
)]
pub async fn create_license(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateLicense>,
) -> AppResult<Created<License>> {
    let license = state.licenses.create_license(payload).await?;
    Ok(created("License created successfully", license))
}

/// Get license by ID
#[utoipa::path(
    get,
    path = "/api/licencias/{id}",
    tag = "Licenses",
    params(
        ("id" = String, Path, description = "License ID")
    ),
    responses(
        (status = 200, description = "License", body = License),
        (status = 404, description = "License not found")
    )
)]
pub async fn get_license(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<License>> {
    let id = parse_id(&id, ENTITY_LICENSE)?;
    Ok(Json(state.licenses.get_license(id).await?))
}

/// Update the supplied fields of a license
#[utoipa::path(
    patch,
    path = "/api/licencias/{id}",
    tag = "Licenses",
    params(
        ("id" = String, Path, description = "License ID")
    ),
    request_body = UpdateLicense,
    responses(
        (status = 200, description = "License updated; envelope data holds the license", body = License),
        (status = 400, description = "Password mismatch, or license number or email taken"),
        (status = 404, description = "License not found")
    )
)]
pub async fn update_license(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<UpdateLicense>,
) -> AppResult<Json<ApiResponse<License>>> {
    let id = parse_id(&id, ENTITY_LICENSE)?;
    let license = state.licenses.update_license(id, payload).await?;
    Ok(Json(ApiResponse::with_data(
        "License updated successfully",
        license,
    )))
}

/// Delete a license
#[utoipa::path(
    delete,
    path = "/api/licencias/{id}",
    tag = "Licenses",
    params(
        ("id" = String, Path, description = "License ID")
    ),
    responses(
        (status = 200, description = "License deleted successfully"),
        (status = 404, description = "License not found")
    )
)]
pub async fn delete_license(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let id = parse_id(&id, ENTITY_LICENSE)?;
    state.licenses.delete_license(id).await?;
    Ok(Json(ApiResponse::message("License deleted successfully")))
}
