use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskText;
use crate::domain::task::ports::TaskRepository;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for task operations.
pub struct TaskService<TR>
where
    TR: TaskRepository,
{
    repository: Arc<TR>,
}

impl<TR> TaskService<TR>
where
    TR: TaskRepository,
{
    pub fn new(repository: Arc<TR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<TR> TaskServicePort for TaskService<TR>
where
    TR: TaskRepository,
{
    async fn create_task(&self, owner: UserId, text: TaskText) -> Result<Task, TaskError> {
        let task = self.repository.insert(owner, &text).await?;

        tracing::debug!(task_id = %task.id, user_id = %owner, "Task created");

        Ok(task)
    }

    async fn list_tasks(&self, owner: UserId, filter: &TaskFilter) -> Result<Vec<Task>, TaskError> {
        self.repository.list(owner, filter).await
    }

    async fn list_completed(
        &self,
        owner: UserId,
        is_completed: bool,
    ) -> Result<Vec<Task>, TaskError> {
        self.repository
            .list(owner, &TaskFilter::completion(is_completed))
            .await
    }

    async fn set_status(
        &self,
        owner: UserId,
        id: TaskId,
        is_completed: bool,
    ) -> Result<Task, TaskError> {
        self.repository
            .update_status(owner, id, is_completed)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    async fn archive_task(&self, owner: UserId, id: TaskId) -> Result<Task, TaskError> {
        let task = self
            .repository
            .archive(owner, id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        tracing::info!(task_id = %id, user_id = %owner, "Task archived");

        Ok(task)
    }
}
