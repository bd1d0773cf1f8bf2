use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::Session;
use crate::domain::session::models::SessionToken;
use crate::domain::session::ports::SessionRepository;
use crate::domain::user::models::UserId;

pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    id: i64,
    user_id: i64,
    session_token: String,
    created_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

impl From<SessionRow> for Session {
    fn from(row: SessionRow) -> Self {
        Session {
            id: row.id,
            user_id: UserId(row.user_id),
            token: SessionToken::new(row.session_token),
            created_at: row.created_at,
            revoked_at: row.revoked_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> SessionError {
    tracing::error!(error = %e, "Session store operation failed");
    SessionError::DatabaseError(e.to_string())
}

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn insert(&self, user_id: UserId, token: &SessionToken) -> Result<Session, SessionError> {
        sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO user_sessions (user_id, session_token)
            VALUES ($1, $2)
            RETURNING id, user_id, session_token, created_at, revoked_at
            "#,
        )
        .bind(user_id.as_i64())
        .bind(token.as_str())
        .fetch_one(&self.pool)
        .await
        .map(Session::from)
        .map_err(database_error)
    }

    async fn find_by_token(&self, token: &SessionToken) -> Result<Option<Session>, SessionError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, user_id, session_token, created_at, revoked_at
            FROM user_sessions
            WHERE session_token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Session::from))
    }

    async fn revoke(&self, token: &SessionToken) -> Result<bool, SessionError> {
        // Conditional update: concurrent callers race on the row lock and at
        // most one of them sees an affected row.
        let result = sqlx::query(
            r#"
            UPDATE user_sessions
            SET revoked_at = now()
            WHERE session_token = $1 AND revoked_at IS NULL
            "#,
        )
        .bind(token.as_str())
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() == 1)
    }
}
