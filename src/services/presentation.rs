use crate::error::AppResult;

/// Surface that shows progress and results of an invocation to the user.
pub trait PresentationSink: Send + Sync {
    fn begin_busy(&self, tooltip: &str);
    fn end_busy(&self);
    fn copy_to_clipboard(&self, text: &str) -> AppResult<()>;
    fn notify_info(&self, message: &str);
    fn notify_error(&self, message: &str);

    /// Notice shown once the message has been delivered.
    fn delivered_notice(&self) -> &'static str {
        "Commit message generated and copied to clipboard."
    }
}
