use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskText;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: i64,
    user_id: i64,
    task_text: String,
    is_completed: bool,
    created_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: TaskId(row.id),
            user_id: UserId(row.user_id),
            text: TaskText::new(row.task_text)?,
            is_completed: row.is_completed,
            created_at: row.created_at,
            archived_at: row.archived_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> TaskError {
    TaskError::DatabaseError(e.to_string())
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, owner: UserId, text: &TaskText) -> Result<Task, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (user_id, task_text)
            VALUES ($1, $2)
            RETURNING id, user_id, task_text, is_completed, created_at, archived_at
            "#,
        )
        .bind(owner.as_i64())
        .bind(text.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)?;

        Task::try_from(row)
    }

    async fn list(&self, owner: UserId, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, user_id, task_text, is_completed, created_at, archived_at
            FROM tasks
            WHERE user_id = $1
              AND archived_at IS NULL
              AND strpos(lower(task_text), lower($2)) > 0
              AND ($3::BOOLEAN IS NULL OR is_completed = $3)
            ORDER BY id
            "#,
        )
        .bind(owner.as_i64())
        .bind(&filter.search_text)
        .bind(filter.is_completed)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update_status(
        &self,
        owner: UserId,
        id: TaskId,
        is_completed: bool,
    ) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET is_completed = $3
            WHERE id = $1 AND user_id = $2 AND archived_at IS NULL
            RETURNING id, user_id, task_text, is_completed, created_at, archived_at
            "#,
        )
        .bind(id.as_i64())
        .bind(owner.as_i64())
        .bind(is_completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Task::try_from).transpose()
    }

    async fn archive(&self, owner: UserId, id: TaskId) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET archived_at = now()
            WHERE id = $1 AND user_id = $2 AND archived_at IS NULL
            RETURNING id, user_id, task_text, is_completed, created_at, archived_at
            "#,
        )
        .bind(id.as_i64())
        .bind(owner.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Task::try_from).transpose()
    }
}
