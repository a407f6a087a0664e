//! OpenAPI documentation.

use utoipa::OpenApi;

use domain::{CreateLicense, Credentials, License, RegisterUser, UpdateLicense, UpdateUser, UserResponse};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::register,
        crate::handlers::user_handler::login,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::license_handler::list_licenses,
        crate::handlers::license_handler::create_license,
        crate::handlers::license_handler::get_license,
        crate::handlers::license_handler::update_license,
        crate::handlers::license_handler::delete_license,
    ),
    components(
        schemas(
            RegisterUser,
            Credentials,
            UpdateUser,
            UserResponse,
            CreateLicense,
            UpdateLicense,
            License,
        )
    ),
    tags(
        (name = "Users", description = "User registration, login and management"),
        (name = "Licenses", description = "Driver license management"),
    )
)]
pub struct ApiDoc;
