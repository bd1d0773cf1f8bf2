use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_task::create_task;
use super::handlers::delete_task::delete_task;
use super::handlers::health::health;
use super::handlers::list_completed_tasks::list_completed_tasks;
use super::handlers::list_tasks::list_tasks;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::register::register;
use super::handlers::search_users::search_users;
use super::handlers::set_task_status::set_task_status;
use super::middleware::authenticate as auth_middleware;
use crate::domain::session::ports::SessionServicePort;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub session_service: Arc<dyn SessionServicePort>,
    pub task_service: Arc<dyn TaskServicePort>,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    session_service: Arc<dyn SessionServicePort>,
    task_service: Arc<dyn TaskServicePort>,
    request_timeout: Duration,
) -> Router {
    let state = AppState {
        user_service,
        session_service,
        task_service,
    };

    let public_routes = Router::new()
        .route("/todo/health", get(health).post(health))
        .route("/todo/public/register", post(register))
        .route("/todo/public/login", post(login));

    let protected_routes = Router::new()
        .route("/todo/users", get(search_users))
        .route("/todo/users/logout", delete(logout))
        .route("/todo/users/task", get(list_tasks).post(create_task))
        .route("/todo/users/task/completed", get(list_completed_tasks))
        .route("/todo/users/task/status", put(set_task_status))
        .route("/todo/users/task/:task_id", delete(delete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Header values are left out of the span: the credential header is a bearer secret.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::session::errors::SessionError;
    use crate::domain::session::models::Identity;
    use crate::domain::session::models::LoginCommand;
    use crate::domain::session::models::LogoutOutcome;
    use crate::domain::session::models::SessionToken;
    use crate::domain::session::models::SignedCredential;
    use crate::domain::task::errors::TaskError;
    use crate::domain::task::models::Task;
    use crate::domain::task::models::TaskFilter;
    use crate::domain::task::models::TaskId;
    use crate::domain::task::models::TaskText;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::CreateUserCommand;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;
    use crate::domain::user::models::UserSummary;

    /// Rejects every credential with the configured error; nothing else is reachable.
    struct Unavailable(SessionError);

    #[async_trait]
    impl UserServicePort for Unavailable {
        async fn register(&self, _: CreateUserCommand) -> Result<User, UserError> {
            Err(UserError::DatabaseError("unavailable".to_string()))
        }

        async fn search_users(&self, _: &str) -> Result<Vec<UserSummary>, UserError> {
            Err(UserError::DatabaseError("unavailable".to_string()))
        }
    }

    #[async_trait]
    impl SessionServicePort for Unavailable {
        async fn login(&self, _: LoginCommand) -> Result<SignedCredential, SessionError> {
            Err(self.0.clone())
        }

        async fn start_session(&self, _: UserId) -> Result<SignedCredential, SessionError> {
            Err(self.0.clone())
        }

        async fn logout(&self, _: &SessionToken) -> Result<LogoutOutcome, SessionError> {
            Err(self.0.clone())
        }

        async fn validate(&self, _: &str) -> Result<Identity, SessionError> {
            Err(self.0.clone())
        }
    }

    #[async_trait]
    impl TaskServicePort for Unavailable {
        async fn create_task(&self, _: UserId, _: TaskText) -> Result<Task, TaskError> {
            unreachable!("guard must reject first")
        }

        async fn list_tasks(&self, _: UserId, _: &TaskFilter) -> Result<Vec<Task>, TaskError> {
            unreachable!("guard must reject first")
        }

        async fn list_completed(&self, _: UserId, _: bool) -> Result<Vec<Task>, TaskError> {
            unreachable!("guard must reject first")
        }

        async fn set_status(&self, _: UserId, _: TaskId, _: bool) -> Result<Task, TaskError> {
            unreachable!("guard must reject first")
        }

        async fn archive_task(&self, _: UserId, _: TaskId) -> Result<Task, TaskError> {
            unreachable!("guard must reject first")
        }
    }

    fn router(validation_error: SessionError) -> Router {
        let services = Arc::new(Unavailable(validation_error));
        create_router(
            services.clone(),
            services.clone(),
            services,
            Duration::from_secs(5),
        )
    }

    fn request(method: &str, uri: &str, credential: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(credential) = credential {
            builder = builder.header(super::super::middleware::CREDENTIAL_HEADER, credential);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_needs_no_credential() {
        let response = router(SessionError::InvalidSession)
            .oneshot(request("GET", "/todo/health", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_guard_status_per_validation_outcome() {
        let cases = [
            (SessionError::InvalidSession, StatusCode::FORBIDDEN),
            (SessionError::Expired, StatusCode::BAD_REQUEST),
            (
                SessionError::DatabaseError("pool timed out".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = router(error)
                .oneshot(request("DELETE", "/todo/users/task/1", Some("credential")))
                .await
                .unwrap();

            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_guard_requires_header() {
        let response = router(SessionError::InvalidSession)
            .oneshot(request("GET", "/todo/users/task", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
