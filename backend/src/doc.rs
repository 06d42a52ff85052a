//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every users endpoint, the health probes, and the
//! request and response bodies they exchange. The document is served by
//! Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::users::{
    LoginRequest, MessageResponse, RegisterRequest, RegisterResponse, UpdateUserRequest,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Registration, login, and user management over an in-memory directory."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Error,
        ErrorCode,
        RegisterRequest,
        LoginRequest,
        UpdateUserRequest,
        RegisterResponse,
        MessageResponse
    )),
    tags(
        (name = "users", description = "Operations related to users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
