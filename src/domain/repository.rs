/// Snapshot of the repository taken once at the start of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RepositoryState {
    pub initial_commit: bool,
}

impl RepositoryState {
    pub fn new(initial_commit: bool) -> Self {
        Self { initial_commit }
    }
}

/// Outcome of `git rev-list --count HEAD`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitCount {
    Count(u64),
    NoHead,
}

impl CommitCount {
    /// Interprets the exit status and captured streams of the count query.
    ///
    /// A failing query whose stderr mentions `unknown revision` means HEAD
    /// does not exist yet; any other failure is returned as the stderr text.
    pub fn from_output(success: bool, stdout: &str, stderr: &str) -> Result<Self, String> {
        if !success {
            if stderr.contains("unknown revision") {
                return Ok(CommitCount::NoHead);
            }
            return Err(stderr.trim().to_string());
        }

        stdout
            .trim()
            .parse::<u64>()
            .map(CommitCount::Count)
            .map_err(|err| format!("unexpected commit count '{}': {err}", stdout.trim()))
    }

    pub fn is_initial_commit(&self) -> bool {
        matches!(self, CommitCount::NoHead | CommitCount::Count(0))
    }
}
