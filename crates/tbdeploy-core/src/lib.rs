pub mod commit;
pub mod engine;
pub mod error;
pub mod report;
pub mod source;
pub mod task;

// Re-exports
pub use commit::{parse_log, ParsedLog, DELIMITER};
pub use engine::{announcement_title, scan_commits, Announcement, DeployEngine, EngineOptions, Scan};
pub use error::{Error, Result};
pub use report::{Report, ReportBuilder, DEFAULT_WEB_BASE};
pub use source::{CommitSource, TrackerApi};
pub use task::{Listing, Project, ProjectId, ProjectTable, Task, TaskId, TaskOutcome, User, UserId, UserTable};
