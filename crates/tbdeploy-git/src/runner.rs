use crate::error::{Error, Result};
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, warn};

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs to completion, optionally inside a working directory.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    cwd: Option<PathBuf>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: Some(cwd.into()),
        }
    }

    /// Run `program` with `args` and wait for it to exit.
    ///
    /// A non-zero exit status is logged and otherwise ignored: the caller gets
    /// whatever the program wrote to stdout. Only a failure to start the
    /// program is an error.
    pub async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        debug!("Running {} {}", program, args.join(" "));

        let mut command = Command::new(program);
        command.args(args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }

        let output = command.output().await.map_err(|source| Error::Spawn {
            program: program.to_string(),
            source,
        })?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        };

        if !result.success() {
            warn!(
                "{} exited with {:?}: {}",
                program,
                result.code,
                result.stderr.trim()
            );
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let runner = CommandRunner::new();
        let result = runner.run("tbdeploy-no-such-program", &[]).await;
        assert!(matches!(result, Err(Error::Spawn { .. })));
    }

    #[tokio::test]
    async fn test_failed_command_returns_output() {
        let dir = tempfile::tempdir().unwrap();
        let runner = CommandRunner::in_dir(dir.path());

        let output = runner.run("git", &["tag", "-l"]).await.unwrap();

        assert!(!output.success());
        assert!(output.stdout.is_empty());
        assert!(!output.stderr.is_empty());
    }
}
