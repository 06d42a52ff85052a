//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error types HTTP-agnostic while allowing Actix
//! handlers to turn directory failures into consistent JSON responses and
//! status codes.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::ports::DirectoryError;
use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message shared by every authentication failure.
pub const INVALID_CREDENTIALS: &str = "invalid credentials";
/// Message returned when an email is already registered.
pub const EMAIL_ALREADY_EXISTS: &str = "email already exists";
/// Message returned when a user id does not resolve.
pub const USER_NOT_FOUND: &str = "user not found";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<DirectoryError> for Error {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateEmail => Error::invalid_request(EMAIL_ALREADY_EXISTS),
            DirectoryError::InvalidCredentials => Error::unauthorized(INVALID_CREDENTIALS),
            DirectoryError::NotFound { id } => {
                Error::not_found(USER_NOT_FOUND).with_details(json!({ "id": id }))
            }
        }
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Render malformed JSON bodies with the shared error schema.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected malformed JSON payload");
    let message = match &err {
        JsonPayloadError::ContentType => "expected an application/json body".to_owned(),
        JsonPayloadError::Deserialize(inner) => format!("invalid JSON body: {inner}"),
        _ => "invalid JSON body".to_owned(),
    };
    Error::invalid_request(message)
        .with_details(json!({ "code": "invalid_json" }))
        .into()
}

/// Render unparsable path segments with the shared error schema.
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected malformed path parameter");
    Error::invalid_request("user id must be a positive integer")
        .with_details(json!({ "field": "id", "code": "invalid_id" }))
        .into()
}
