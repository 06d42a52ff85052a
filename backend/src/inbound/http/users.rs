//! Users API handlers.
//!
//! ```text
//! POST   /register   {"name":"Ada","email":"ada@example.com","password":"pw123456"}
//! POST   /login      {"email":"ada@example.com","password":"pw123456"}
//! GET    /users
//! GET    /users/{id}
//! PUT    /users/{id} {"name":"Ada L.","email":"ada@example.com"}
//! DELETE /users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{json_error_handler, path_error_handler};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation;

/// Registration request body for `POST /register`.
///
/// Fields are optional at the wire level so missing values surface as
/// validation errors with field details rather than opaque parse failures.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Display name; required only when the server is configured to.
    pub name: Option<String>,
    /// Email address used as the login handle.
    pub email: Option<String>,
    /// Password, at least the configured minimum length.
    pub password: Option<String>,
}

/// Login request body for `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Registered email address.
    pub email: Option<String>,
    /// Password supplied at registration.
    pub password: Option<String>,
}

/// Update request body for `PUT /users/{id}`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateUserRequest {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement email address.
    pub email: Option<String>,
}

/// Confirmation body returned by mutating endpoints.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    #[schema(example = "User updated successfully")]
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_owned(),
        }
    }
}

/// Confirmation body returned by `POST /register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterResponse {
    /// Human-readable confirmation.
    #[schema(example = "User registered successfully")]
    pub message: String,
    /// Identifier issued to the new user.
    #[schema(value_type = u64, example = 1)]
    pub id: UserId,
}

/// Mount the users endpoints together with JSON and path error handling.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_directory::inbound::http::users;
///
/// let app = App::new().configure(users::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(register)
        .service(login)
        .service(list_users)
        .service(get_user)
        .service(update_user)
        .service(delete_user);
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid request or email already exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register"
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let name = state.policy.name(name)?;
    let email = validation::email(email)?;
    let credential = state.policy.new_password(password)?;

    let id = state
        .directory
        .register(name, email, credential)
        .inspect_err(|err| info!(error = %err, "registration rejected"))?;
    info!(user_id = %id, "user registered");
    Ok(HttpResponse::Created().json(RegisterResponse {
        message: "User registered successfully".to_owned(),
        id,
    }))
}

/// Authenticate an email/password pair and return the user.
///
/// Unknown emails and wrong passwords yield the same 401 response.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let LoginRequest { email, password } = payload.into_inner();
    let email = validation::email(email)?;
    let credential = validation::required_password(password)?;

    let user = state
        .directory
        .authenticate(&email, &credential)
        .inspect_err(|_| warn!("login rejected"))?;
    info!(user_id = %user.id(), "user authenticated");
    Ok(web::Json(user))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [User])
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.directory.list_all()))
}

/// Fetch a single user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<User>> {
    let id = validation::user_id(path.into_inner())?;
    let user = state.directory.get_by_id(id)?;
    Ok(web::Json(user))
}

/// Replace a user's name and email.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = MessageResponse),
        (status = 400, description = "Invalid request or email already exists", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = validation::user_id(path.into_inner())?;
    let UpdateUserRequest { name, email } = payload.into_inner();
    let name = state.policy.name(name)?;
    let email = validation::email(email)?;

    state.directory.update(id, name, email)?;
    info!(user_id = %id, "user updated");
    Ok(web::Json(MessageResponse::new("User updated successfully")))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = u64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid identifier", body = Error),
        (status = 404, description = "User not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = validation::user_id(path.into_inner())?;
    state.directory.delete(id)?;
    info!(user_id = %id, "user deleted");
    Ok(web::Json(MessageResponse::new("User deleted successfully")))
}
