use serde::Serialize;
use tbdeploy_core::{Announcement, ProjectId};

/// Form body for `POST /conversations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewConversation {
    pub project_id: ProjectId,
    pub name: String,
    pub body: String,
}

impl From<&Announcement> for NewConversation {
    fn from(announcement: &Announcement) -> Self {
        Self {
            project_id: announcement.project_id,
            name: announcement.name.clone(),
            body: announcement.body.clone(),
        }
    }
}
