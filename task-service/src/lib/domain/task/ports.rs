use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskText;
use crate::domain::user::models::UserId;

/// Port for task operations.
///
/// Every operation is scoped to `owner`; tasks of other users behave as if
/// they did not exist.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_task(&self, owner: UserId, text: TaskText) -> Result<Task, TaskError>;

    /// Live tasks of `owner` matching `filter`, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tasks(&self, owner: UserId, filter: &TaskFilter) -> Result<Vec<Task>, TaskError>;

    /// Live tasks of `owner` with the given completion status.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_completed(&self, owner: UserId, is_completed: bool)
        -> Result<Vec<Task>, TaskError>;

    /// Mark a task completed or not.
    ///
    /// # Errors
    /// * `NotFound` - No live task with this id belongs to `owner`
    /// * `DatabaseError` - Database operation failed
    async fn set_status(
        &self,
        owner: UserId,
        id: TaskId,
        is_completed: bool,
    ) -> Result<Task, TaskError>;

    /// Soft-delete a task.
    ///
    /// # Returns
    /// The archived task
    ///
    /// # Errors
    /// * `NotFound` - No live task with this id belongs to `owner`
    /// * `DatabaseError` - Database operation failed
    async fn archive_task(&self, owner: UserId, id: TaskId) -> Result<Task, TaskError>;
}

/// Persistence operations for tasks.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    async fn insert(&self, owner: UserId, text: &TaskText) -> Result<Task, TaskError>;

    async fn list(&self, owner: UserId, filter: &TaskFilter) -> Result<Vec<Task>, TaskError>;

    /// `None` when no live task with this id belongs to `owner`.
    async fn update_status(
        &self,
        owner: UserId,
        id: TaskId,
        is_completed: bool,
    ) -> Result<Option<Task>, TaskError>;

    /// Set `archived_at` on a live task. `None` when no live task with this
    /// id belongs to `owner`.
    async fn archive(&self, owner: UserId, id: TaskId) -> Result<Option<Task>, TaskError>;
}
