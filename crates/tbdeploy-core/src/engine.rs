use crate::{
    parse_log, CommitSource, Error, ParsedLog, ProjectId, ProjectTable, ReportBuilder, Result,
    TaskId, TaskOutcome, TrackerApi, UserTable, DEFAULT_WEB_BASE, DELIMITER,
};
use chrono::{DateTime, Local};

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Project the announcement is posted to.
    pub project_id: ProjectId,
    /// List each referenced task once instead of once per reference.
    pub dedupe: bool,
    /// Range start; the last tag is used when unset.
    pub tag: Option<String>,
    pub web_base: String,
}

impl EngineOptions {
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            dedupe: false,
            tag: None,
            web_base: DEFAULT_WEB_BASE.to_string(),
        }
    }

    pub fn with_dedupe(mut self, dedupe: bool) -> Self {
        self.dedupe = dedupe;
        self
    }

    pub fn with_tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_web_base(mut self, web_base: String) -> Self {
        self.web_base = web_base;
        self
    }
}

/// Commits found since the range start.
#[derive(Debug, Clone)]
pub struct Scan {
    pub tag: String,
    pub log: ParsedLog,
}

/// A rendered deployment report, ready to be posted.
#[derive(Debug, Clone)]
pub struct Announcement {
    pub project_id: ProjectId,
    pub name: String,
    pub body: String,
    pub tag: String,
    pub task_count: usize,
    pub failed_count: usize,
}

pub fn announcement_title(now: &DateTime<Local>) -> String {
    format!("Deployment on {}", now.format("%d %b %Y %H:%M"))
}

/// Resolve the range start and parse the commits after it.
///
/// Without an explicit `tag` the last listed tag is used; an empty tag list
/// is an error.
pub async fn scan_commits<G>(commits: &G, tag: Option<&str>, dedupe: bool) -> Result<Scan>
where
    G: CommitSource + ?Sized,
{
    let tag = match tag {
        Some(tag) => tag.to_string(),
        None => commits.tags().await?.pop().ok_or(Error::NoTags)?,
    };
    tracing::info!("Previous tag: {}", tag);

    let range = format!("{}..HEAD", tag);
    let text = commits.log(&range, DELIMITER).await?;

    let mut log = parse_log(&text, DELIMITER);
    if dedupe {
        log.dedupe();
    }

    tracing::info!(
        "Found {} task references and {} untasked commits in {}",
        log.task_ids.len(),
        log.untasked.len(),
        range
    );

    Ok(Scan { tag, log })
}

pub struct DeployEngine<G, A> {
    commits: G,
    api: A,
    options: EngineOptions,
}

impl<G, A> DeployEngine<G, A>
where
    G: CommitSource,
    A: TrackerApi,
{
    pub fn new(commits: G, api: A, options: EngineOptions) -> Self {
        Self {
            commits,
            api,
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub async fn scan(&self) -> Result<Scan> {
        scan_commits(&self.commits, self.options.tag.as_deref(), self.options.dedupe).await
    }

    /// Fetch every task, one request each. A task the tracker refuses to
    /// serve becomes a [`TaskOutcome::Failed`]; any other error aborts.
    pub async fn fetch_tasks(&self, ids: &[TaskId]) -> Result<Vec<TaskOutcome>> {
        let mut outcomes = Vec::with_capacity(ids.len());

        for &id in ids {
            let outcome = match self.api.task(id).await {
                Ok(task) => TaskOutcome::Found(task),
                Err(Error::Status { status, url }) => {
                    tracing::warn!("Failed to access task {}: HTTP {} from {}", id, status, url);
                    TaskOutcome::Failed {
                        id,
                        reason: format!("HTTP {}", status),
                    }
                }
                Err(e) => return Err(e),
            };
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Build the announcement without posting it.
    pub async fn prepare(&self) -> Result<Announcement> {
        let scan = self.scan().await?;

        let users: UserTable = self.api.users().await?.into_iter().collect();
        let projects: ProjectTable = self.api.projects().await?.into_iter().collect();
        tracing::debug!("Loaded {} users and {} projects", users.len(), projects.len());

        let outcomes = self.fetch_tasks(&scan.log.task_ids).await?;

        let report = ReportBuilder::new(&users, &projects)
            .with_web_base(&self.options.web_base)
            .build(&outcomes, &scan.log.untasked, &scan.tag);

        Ok(Announcement {
            project_id: self.options.project_id,
            name: announcement_title(&Local::now()),
            body: report.to_string(),
            tag: scan.tag,
            task_count: report.task_count(),
            failed_count: outcomes.iter().filter(|o| o.is_failed()).count(),
        })
    }

    /// Build the announcement and post it as a new conversation.
    pub async fn announce(&self) -> Result<Announcement> {
        let announcement = self.prepare().await?;

        tracing::info!(
            "Posting '{}' to project {}",
            announcement.name,
            announcement.project_id
        );
        let created = self.api.create_conversation(&announcement).await?;
        tracing::debug!("Conversation created: {}", created);

        Ok(announcement)
    }
}
