use crate::error::Result;
use crate::runner::CommandRunner;
use async_trait::async_trait;
use std::path::Path;
use tbdeploy_core::CommitSource;
use tracing::info;

/// A working copy read through the `git` command line.
pub struct GitRepository {
    runner: CommandRunner,
    program: String,
}

impl GitRepository {
    pub fn open(path: &Path) -> Self {
        Self {
            runner: CommandRunner::in_dir(path),
            program: "git".to_string(),
        }
    }

    /// Use a different git executable.
    pub fn with_program(mut self, program: String) -> Self {
        self.program = program;
        self
    }

    /// Pretty format for one commit: author, subject, short hash, body, then
    /// the delimiter on its own line.
    pub fn log_format(delimiter: &str) -> String {
        format!("--pretty=format:%an: %s (`%h`)%n%n%b%n{}", delimiter)
    }

    /// Tag names as `git tag -l` prints them, blank lines dropped.
    pub async fn list_tags(&self) -> Result<Vec<String>> {
        let output = self.runner.run(&self.program, &["tag", "-l"]).await?;

        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Oldest-first log of `range`.
    pub async fn log_range(&self, range: &str, delimiter: &str) -> Result<String> {
        info!("Reading commits in {}", range);

        let format = Self::log_format(delimiter);
        let output = self
            .runner
            .run(&self.program, &["log", format.as_str(), "--reverse", range])
            .await?;

        Ok(output.stdout)
    }
}

#[async_trait]
impl CommitSource for GitRepository {
    async fn tags(&self) -> tbdeploy_core::Result<Vec<String>> {
        Ok(self.list_tags().await?)
    }

    async fn log(&self, range: &str, delimiter: &str) -> tbdeploy_core::Result<String> {
        Ok(self.log_range(range, delimiter).await?)
    }
}
