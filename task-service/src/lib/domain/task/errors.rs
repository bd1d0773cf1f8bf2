use thiserror::Error;

use crate::domain::task::models::TaskId;

/// Error for TaskText validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTextError {
    #[error("Task is empty")]
    Empty,

    #[error("Task too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all task operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid task: {0}")]
    InvalidText(#[from] TaskTextError),

    #[error("Task not found: {0}")]
    NotFound(TaskId),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
