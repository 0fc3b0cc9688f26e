use crate::{ProjectId, ProjectTable, TaskId, TaskOutcome, UserTable};
use std::fmt;

pub const DEFAULT_WEB_BASE: &str = "https://teambox.com";

const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub task_id: TaskId,
    pub name: String,
    pub filer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSection {
    pub project_id: ProjectId,
    pub project_name: String,
    pub entries: Vec<ReportEntry>,
}

/// Deployment summary, grouped by project in first-seen order.
#[derive(Debug, Clone)]
pub struct Report {
    pub sections: Vec<ProjectSection>,
    pub untasked: Vec<String>,
    pub tag: String,
    web_base: String,
}

impl Report {
    pub fn task_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn project_url(&self, project_id: ProjectId) -> String {
        format!("{}/projects/{}", self.web_base, project_id)
    }

    pub fn task_url(&self, project_id: ProjectId, task_id: TaskId) -> String {
        format!("{}/projects/{}/tasks/{}", self.web_base, project_id, task_id)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "*Achtung! We've just deployed the following tasks!*")?;
        writeln!(f)?;
        writeln!(f, "#### Tasks")?;
        writeln!(f)?;

        for section in &self.sections {
            writeln!(
                f,
                " * **[{}]({})**",
                section.project_name,
                self.project_url(section.project_id)
            )?;
            for entry in &section.entries {
                writeln!(
                    f,
                    "   * [{}]({}) (filed by @{})",
                    entry.name,
                    self.task_url(section.project_id, entry.task_id),
                    entry.filer
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "#### Misc. Commits")?;
        writeln!(f)?;
        for subject in &self.untasked {
            writeln!(f, " * {}", subject)?;
        }

        writeln!(f)?;
        writeln!(f, "Git tag: `{}`", self.tag)
    }
}

/// Joins task outcomes with the user and project tables.
pub struct ReportBuilder<'a> {
    users: &'a UserTable,
    projects: &'a ProjectTable,
    web_base: String,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(users: &'a UserTable, projects: &'a ProjectTable) -> Self {
        Self {
            users,
            projects,
            web_base: DEFAULT_WEB_BASE.to_string(),
        }
    }

    pub fn with_web_base(mut self, web_base: &str) -> Self {
        self.web_base = web_base.trim_end_matches('/').to_string();
        self
    }

    pub fn build(&self, outcomes: &[TaskOutcome], untasked: &[String], tag: &str) -> Report {
        let mut sections: Vec<ProjectSection> = Vec::new();

        for outcome in outcomes {
            let project_id = outcome.project_id();
            let entry = ReportEntry {
                task_id: outcome.id(),
                name: outcome.name().into_owned(),
                filer: outcome
                    .user_id()
                    .and_then(|id| self.users.username(id))
                    .unwrap_or(UNKNOWN)
                    .to_string(),
            };

            match sections.iter_mut().find(|s| s.project_id == project_id) {
                Some(section) => section.entries.push(entry),
                None => sections.push(ProjectSection {
                    project_id,
                    project_name: self
                        .projects
                        .name(project_id)
                        .unwrap_or(UNKNOWN)
                        .to_string(),
                    entries: vec![entry],
                }),
            }
        }

        Report {
            sections,
            untasked: untasked.to_vec(),
            tag: tag.to_string(),
            web_base: self.web_base.clone(),
        }
    }
}
