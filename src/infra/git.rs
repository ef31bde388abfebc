use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::domain::repository::CommitCount;
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

/// Locale forced on every git invocation so stderr stays in English.
const GIT_LOCALE: [(&str, &str); 2] = [("LC_ALL", "C"), ("LANGUAGE", "C")];

pub struct GitCli {
    workspace_root: PathBuf,
    env: Vec<(String, String)>,
}

struct GitOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self {
            workspace_root,
            env: Vec::new(),
        }
    }

    /// Extra environment for git; the locale pin is applied after it.
    #[cfg(test)]
    fn with_env(mut self, vars: &[(&str, &str)]) -> Self {
        self.env = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        self
    }

    async fn run(&self, args: &[&str]) -> AppResult<GitOutput> {
        debug!(?args, root = %self.workspace_root.display(), "running git");
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workspace_root)
            .envs(self.env.iter().map(|(key, value)| (key, value)))
            .envs(GIT_LOCALE)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        Ok(GitOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn is_initial_commit(&self) -> AppResult<bool> {
        let output = self.run(&["rev-list", "--count", "HEAD"]).await?;
        let count = CommitCount::from_output(output.success, &output.stdout, &output.stderr)
            .map_err(AppError::VersionControl)?;
        debug!(?count, "commit count");
        Ok(count.is_initial_commit())
    }

    async fn staged_diff(&self) -> AppResult<Option<String>> {
        let output = self.run(&["diff", "--cached"]).await?;
        if !output.success {
            return Err(AppError::VersionControl(output.stderr.trim().to_string()));
        }
        if output.stdout.is_empty() {
            Ok(None)
        } else {
            Ok(Some(output.stdout))
        }
    }
}
