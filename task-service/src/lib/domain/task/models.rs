use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::task::errors::TaskTextError;
use crate::domain::user::models::UserId;

/// A to-do item owned by exactly one user.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub user_id: UserId,
    pub text: TaskText,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub i64);

impl TaskId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Task description
///
/// Trimmed, 1-1000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskText(String);

impl TaskText {
    const MAX_LENGTH: usize = 1000;

    /// # Errors
    /// * `Empty` - Text is blank after trimming
    /// * `TooLong` - Text longer than 1000 characters
    pub fn new(text: String) -> Result<Self, TaskTextError> {
        let trimmed = text.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            Err(TaskTextError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(TaskTextError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Listing filter for a user's live tasks.
///
/// An empty `search_text` matches every task; `is_completed` filters only
/// when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search_text: String,
    pub is_completed: Option<bool>,
}

impl TaskFilter {
    pub fn completion(is_completed: bool) -> Self {
        Self {
            search_text: String::new(),
            is_completed: Some(is_completed),
        }
    }

    /// In-memory equivalent of the repository predicate.
    pub fn matches(&self, task: &Task) -> bool {
        let text_matches = task
            .text
            .as_str()
            .to_lowercase()
            .contains(&self.search_text.to_lowercase());
        let status_matches = self
            .is_completed
            .map_or(true, |completed| task.is_completed == completed);

        task.archived_at.is_none() && text_matches && status_matches
    }
}
