use std::sync::atomic::{AtomicBool, Ordering};

use tracing::error;

use crate::context::AppContext;
use crate::error::AppError;
use crate::services::PresentationSink;
use crate::workflow::commit_message::{WorkflowOutcome, generate_commit_message};

const BUSY_TOOLTIP: &str = "Generating commit message...";
const NO_CHANGES_NOTICE: &str = "No changes to commit.";

/// How a single trigger ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStatus {
    Delivered,
    NoChanges,
    Failed,
    Rejected,
}

impl InvocationStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, InvocationStatus::Failed | InvocationStatus::Rejected)
    }
}

/// Entry point for the presentation layer. Runs one invocation at a time and
/// turns its result into notifications and a clipboard write.
pub struct CommitMessageTrigger {
    ctx: AppContext,
    in_flight: AtomicBool,
}

impl CommitMessageTrigger {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn trigger(&self) -> InvocationStatus {
        let presentation = self.ctx.presentation.as_ref();

        let Some(_invocation) = InFlight::acquire(&self.in_flight) else {
            presentation.notify_error(&AppError::Busy.to_string());
            return InvocationStatus::Rejected;
        };

        let result = {
            let _busy = BusyIndicator::start(presentation, BUSY_TOOLTIP);
            generate_commit_message(&self.ctx).await
        };

        match result {
            Ok(WorkflowOutcome::NoChanges) => {
                presentation.notify_info(NO_CHANGES_NOTICE);
                InvocationStatus::NoChanges
            }
            Ok(WorkflowOutcome::Generated(message)) => {
                match presentation.copy_to_clipboard(message.as_str()) {
                    Ok(()) => {
                        presentation.notify_info(presentation.delivered_notice());
                        InvocationStatus::Delivered
                    }
                    Err(err) => fail(presentation, err),
                }
            }
            Err(err) => fail(presentation, err),
        }
    }
}

fn fail(presentation: &dyn PresentationSink, err: AppError) -> InvocationStatus {
    error!(error = %err, "commit message generation failed");
    presentation.notify_error(&err.to_string());
    InvocationStatus::Failed
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Clears the busy indicator when dropped, on every exit path.
struct BusyIndicator<'a>(&'a dyn PresentationSink);

impl<'a> BusyIndicator<'a> {
    fn start(presentation: &'a dyn PresentationSink, tooltip: &str) -> Self {
        presentation.begin_busy(tooltip);
        Self(presentation)
    }
}

impl Drop for BusyIndicator<'_> {
    fn drop(&mut self) {
        self.0.end_busy();
    }
}
