use async_trait::async_trait;

use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Whether HEAD has no reachable commits yet.
    async fn is_initial_commit(&self) -> AppResult<bool>;
    /// Diff of the index against HEAD; `None` when nothing is staged.
    async fn staged_diff(&self) -> AppResult<Option<String>>;
}
