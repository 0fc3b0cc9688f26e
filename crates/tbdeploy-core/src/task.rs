use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

pub type TaskId = u64;
pub type UserId = u64;
pub type ProjectId = i64;

/// Grouping key used for tasks that could not be fetched.
pub const FAILED_PROJECT_ID: ProjectId = -1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub project_id: ProjectId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
}

/// Envelope the tracker wraps list responses in.
#[derive(Debug, Clone, Deserialize)]
pub struct Listing<T> {
    #[serde(default = "Vec::new")]
    pub objects: Vec<T>,
}

/// Result of looking up a single referenced task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Found(Task),
    Failed { id: TaskId, reason: String },
}

impl TaskOutcome {
    pub fn id(&self) -> TaskId {
        match self {
            TaskOutcome::Found(task) => task.id,
            TaskOutcome::Failed { id, .. } => *id,
        }
    }

    pub fn project_id(&self) -> ProjectId {
        match self {
            TaskOutcome::Found(task) => task.project_id,
            TaskOutcome::Failed { .. } => FAILED_PROJECT_ID,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            TaskOutcome::Found(task) => Some(task.user_id),
            TaskOutcome::Failed { .. } => None,
        }
    }

    pub fn name(&self) -> Cow<'_, str> {
        match self {
            TaskOutcome::Found(task) => Cow::Borrowed(task.name.as_str()),
            TaskOutcome::Failed { id, reason } => {
                Cow::Owned(format!("Failed to access {}: {}", id, reason))
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TaskOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserTable(HashMap<UserId, String>);

impl UserTable {
    pub fn username(&self, id: UserId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<User> for UserTable {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self(iter.into_iter().map(|u| (u.id, u.username)).collect())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectTable(HashMap<ProjectId, String>);

impl ProjectTable {
    pub fn name(&self, id: ProjectId) -> Option<&str> {
        self.0.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Project> for ProjectTable {
    fn from_iter<I: IntoIterator<Item = Project>>(iter: I) -> Self {
        Self(iter.into_iter().map(|p| (p.id, p.name)).collect())
    }
}
