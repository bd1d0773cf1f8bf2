use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::session::errors::SessionError;
use crate::domain::task::errors::TaskError;
use crate::user::errors::UserError;

pub mod create_task;
pub mod delete_task;
pub mod health;
pub mod list_completed_tasks;
pub mod list_tasks;
pub mod login;
pub mod logout;
pub mod register;
pub mod search_users;
pub mod set_task_status;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Body of every 500; the cause goes to the log only.
const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Shared by unknown email and wrong password so login does not reveal which accounts exist.
const LOGIN_FAILED_MESSAGE: &str = "invalid credentials";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidName(_) | UserError::InvalidEmail(_) | UserError::EmptyPassword => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Password(_) | UserError::DatabaseError(_) => {
                tracing::error!(error = %err, "User operation failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownEmail(_) | SessionError::BadCredentials => {
                ApiError::Unauthorized(LOGIN_FAILED_MESSAGE.to_string())
            }
            SessionError::BadSignature(_) => ApiError::Unauthorized(err.to_string()),
            SessionError::InvalidSession => ApiError::Forbidden(err.to_string()),
            SessionError::Expired => ApiError::BadRequest(err.to_string()),
            SessionError::UnknownSession => ApiError::NotFound(err.to_string()),
            SessionError::IssuanceFailed(_)
            | SessionError::Password(_)
            | SessionError::DatabaseError(_) => {
                tracing::error!(error = %err, "Session operation failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::InvalidText(_) => ApiError::UnprocessableEntity(err.to_string()),
            TaskError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TaskError::DatabaseError(_) => {
                tracing::error!(error = %err, "Task operation failed");
                ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use auth::JwtError;

    use super::*;
    use crate::domain::task::models::TaskId;

    #[test]
    fn test_session_errors_map_to_distinct_statuses() {
        assert_eq!(
            ApiError::from(SessionError::BadSignature(JwtError::InvalidSignature)),
            ApiError::Unauthorized("bad signature".to_string())
        );
        assert_eq!(
            ApiError::from(SessionError::InvalidSession),
            ApiError::Forbidden("invalid session".to_string())
        );
        assert_eq!(
            ApiError::from(SessionError::Expired),
            ApiError::BadRequest("already logged out".to_string())
        );
        assert!(matches!(
            ApiError::from(SessionError::DatabaseError("down".to_string())),
            ApiError::InternalServerError(_)
        ));
    }

    #[test]
    fn test_login_failures_share_one_message() {
        let unknown_email = ApiError::from(SessionError::UnknownEmail("b@x.com".to_string()));
        let bad_password = ApiError::from(SessionError::BadCredentials);

        assert_eq!(
            unknown_email,
            ApiError::Unauthorized("invalid credentials".to_string())
        );
        assert_eq!(unknown_email, bad_password);
    }

    #[test]
    fn test_internal_errors_hide_the_cause() {
        let errors = [
            ApiError::from(SessionError::DatabaseError(
                "connection to 10.0.0.5 refused".to_string(),
            )),
            ApiError::from(SessionError::IssuanceFailed("key rejected".to_string())),
            ApiError::from(UserError::DatabaseError(
                "connection to 10.0.0.5 refused".to_string(),
            )),
            ApiError::from(TaskError::DatabaseError(
                "connection to 10.0.0.5 refused".to_string(),
            )),
        ];

        for error in errors {
            assert_eq!(
                error,
                ApiError::InternalServerError("Internal server error".to_string())
            );
        }
    }

    #[test]
    fn test_task_errors() {
        assert!(matches!(
            ApiError::from(TaskError::NotFound(TaskId(1))),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_error_envelope() {
        let response = ApiError::Forbidden("invalid session".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
