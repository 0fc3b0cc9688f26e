use crate::{Announcement, Project, Result, Task, TaskId, User};
use async_trait::async_trait;

/// Where commit history comes from.
#[async_trait]
pub trait CommitSource: Send + Sync {
    /// All tags, in the order the version-control tool lists them.
    async fn tags(&self) -> Result<Vec<String>>;

    /// Log text for `range`, with `delimiter` written after every commit.
    async fn log(&self, range: &str, delimiter: &str) -> Result<String>;
}

/// The project tracker the announcement is read from and posted to.
#[async_trait]
pub trait TrackerApi: Send + Sync {
    async fn users(&self) -> Result<Vec<User>>;

    async fn projects(&self) -> Result<Vec<Project>>;

    /// Fetch a single task. A rejected request must surface as
    /// [`crate::Error::Status`] so callers can fall back per task.
    async fn task(&self, id: TaskId) -> Result<Task>;

    /// Post the announcement as a new conversation.
    async fn create_conversation(&self, announcement: &Announcement) -> Result<serde_json::Value>;
}
