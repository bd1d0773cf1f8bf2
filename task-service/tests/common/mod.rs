#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::Authenticator;
use auth::SessionClaims;
use chrono::Utc;
use serde_json::json;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use task_service::domain::session::errors::SessionError;
use task_service::domain::session::models::Session;
use task_service::domain::session::models::SessionToken;
use task_service::domain::session::ports::CredentialStore;
use task_service::domain::session::ports::SessionRepository;
use task_service::domain::session::service::SessionService;
use task_service::domain::task::errors::TaskError;
use task_service::domain::task::models::Task;
use task_service::domain::task::models::TaskFilter;
use task_service::domain::task::models::TaskId;
use task_service::domain::task::models::TaskText;
use task_service::domain::task::ports::TaskRepository;
use task_service::domain::task::service::TaskService;
use task_service::domain::user::errors::UserError;
use task_service::domain::user::models::EmailAddress;
use task_service::domain::user::models::NewUser;
use task_service::domain::user::models::User;
use task_service::domain::user::models::UserId;
use task_service::domain::user::models::UserSummary;
use task_service::domain::user::ports::UserRepository;
use task_service::domain::user::service::UserService;
use task_service::inbound::http::middleware::CREDENTIAL_HEADER;
use task_service::inbound::http::router::create_router;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory stand-in for the Postgres adapters, implementing every
/// persistence port with the same predicates as the SQL.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    users: Vec<User>,
    sessions: Vec<Session>,
    tasks: Vec<Task>,
    revocations: HashMap<String, usize>,
}

impl InMemoryStore {
    /// How many times a session was moved from active to revoked.
    pub fn revocation_count(&self, token: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.revocations.get(token).copied().unwrap_or(0)
    }

    pub fn session(&self, token: &str) -> Option<Session> {
        let state = self.state.lock().unwrap();
        state
            .sessions
            .iter()
            .find(|s| s.token.as_str() == token)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut state = self.state.lock().unwrap();

        if state.users.iter().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let created = User {
            id: UserId(state.users.len() as i64 + 1),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        state.users.push(created.clone());

        Ok(created)
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, UserError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().any(|u| &u.email == email))
    }

    async fn search_by_name(&self, search_text: &str) -> Result<Vec<UserSummary>, UserError> {
        let state = self.state.lock().unwrap();
        let needle = search_text.to_lowercase();

        Ok(state
            .users
            .iter()
            .filter(|u| u.name.as_str().to_lowercase().contains(&needle))
            .map(|u| UserSummary {
                name: u.name.to_string(),
                email: u.email.to_string(),
            })
            .collect())
    }
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn find_password_hash(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<String>, SessionError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .users
            .iter()
            .find(|u| &u.email == email)
            .map(|u| u.password_hash.clone()))
    }

    async fn find_user_id(&self, email: &EmailAddress) -> Result<Option<UserId>, SessionError> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| &u.email == email).map(|u| u.id))
    }
}

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn insert(&self, user_id: UserId, token: &SessionToken) -> Result<Session, SessionError> {
        let mut state = self.state.lock().unwrap();

        let session = Session {
            id: state.sessions.len() as i64 + 1,
            user_id,
            token: token.clone(),
            created_at: Utc::now(),
            revoked_at: None,
        };
        state.sessions.push(session.clone());

        Ok(session)
    }

    async fn find_by_token(&self, token: &SessionToken) -> Result<Option<Session>, SessionError> {
        let state = self.state.lock().unwrap();
        Ok(state.sessions.iter().find(|s| &s.token == token).cloned())
    }

    async fn revoke(&self, token: &SessionToken) -> Result<bool, SessionError> {
        let mut state = self.state.lock().unwrap();

        let revoked = match state
            .sessions
            .iter_mut()
            .find(|s| &s.token == token && s.revoked_at.is_none())
        {
            Some(session) => {
                session.revoked_at = Some(Utc::now());
                true
            }
            None => false,
        };

        if revoked {
            *state
                .revocations
                .entry(token.as_str().to_string())
                .or_default() += 1;
        }

        Ok(revoked)
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn insert(&self, owner: UserId, text: &TaskText) -> Result<Task, TaskError> {
        let mut state = self.state.lock().unwrap();

        let task = Task {
            id: TaskId(state.tasks.len() as i64 + 1),
            user_id: owner,
            text: text.clone(),
            is_completed: false,
            created_at: Utc::now(),
            archived_at: None,
        };
        state.tasks.push(task.clone());

        Ok(task)
    }

    async fn list(&self, owner: UserId, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter()
            .filter(|t| t.user_id == owner && filter.matches(t))
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        owner: UserId,
        id: TaskId,
        is_completed: bool,
    ) -> Result<Option<Task>, TaskError> {
        let mut state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner && t.archived_at.is_none())
            .map(|t| {
                t.is_completed = is_completed;
                t.clone()
            }))
    }

    async fn archive(&self, owner: UserId, id: TaskId) -> Result<Option<Task>, TaskError> {
        let mut state = self.state.lock().unwrap();
        Ok(state
            .tasks
            .iter_mut()
            .find(|t| t.id == id && t.user_id == owner && t.archived_at.is_none())
            .map(|t| {
                t.archived_at = Some(Utc::now());
                t.clone()
            }))
    }
}

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryStore>,
    pub authenticator: Authenticator,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryStore::default());
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&store),
            Arc::clone(&authenticator),
        ));
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            authenticator,
            chrono::Duration::minutes(20),
        ));
        let task_service = Arc::new(TaskService::new(Arc::clone(&store)));

        let router = create_router(
            user_service,
            session_service,
            task_service,
            Duration::from_secs(30),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            authenticator: Authenticator::new(TEST_SECRET),
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with the credential header
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).header(CREDENTIAL_HEADER, token)
    }

    /// Helper to make POST request with the credential header
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).header(CREDENTIAL_HEADER, token)
    }

    /// Helper to make PUT request with the credential header
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .header(CREDENTIAL_HEADER, token)
    }

    /// Helper to make DELETE request with the credential header
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .header(CREDENTIAL_HEADER, token)
    }

    /// Register an account and return the credential issued with it.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .post("/todo/public/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        credential_from(response).await
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/todo/public/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Re-sign the claims of `credential` so that it expired a minute ago.
    pub fn expire(&self, credential: &str) -> String {
        let claims = self
            .authenticator
            .parse_credential(credential)
            .expect("Failed to parse credential");

        self.authenticator
            .issue_credential(&SessionClaims::new(
                claims.user_id,
                claims.session_token,
                Utc::now() - chrono::Duration::minutes(1),
            ))
            .expect("Failed to sign credential")
    }

    /// Session token embedded in a credential.
    pub fn session_token(&self, credential: &str) -> String {
        self.authenticator
            .parse_credential(credential)
            .expect("Failed to parse credential")
            .session_token
    }
}

pub async fn credential_from(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"]["token"]
        .as_str()
        .expect("Missing token in response")
        .to_string()
}

/// Throwaway Postgres database with migrations applied, dropped on `Drop`.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    postgres_url: String,
}

impl TestDb {
    /// Create a uniquely named database on the server behind `DATABASE_URL`.
    ///
    /// Returns `None` when the variable is unset so that suites without a
    /// database still pass.
    pub async fn from_env() -> Option<Self> {
        let Ok(postgres_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL is not set, skipping Postgres repository test");
            return None;
        };

        let db_name = format!(
            "test_task_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            postgres_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let postgres_url = self.postgres_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&postgres_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
