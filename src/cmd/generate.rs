use crate::context::AppContext;
use crate::workflow::trigger::{CommitMessageTrigger, InvocationStatus};

pub async fn run(ctx: AppContext) -> InvocationStatus {
    CommitMessageTrigger::new(ctx).trigger().await
}
