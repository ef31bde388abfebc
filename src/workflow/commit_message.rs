use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::config::GenerationSettings;
use crate::context::AppContext;
use crate::domain::diff;
use crate::domain::message::{CombinedSummary, FinalMessage, Instructions, user_payload};
use crate::domain::repository::RepositoryState;
use crate::error::{AppError, AppResult};
use crate::services::{CompletionRequest, LanguageModelService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    NoChanges,
    Generated(FinalMessage),
}

/// Runs the full pipeline: repository state, staged diff, per-chunk
/// summaries and the final polish request.
pub async fn generate_commit_message(ctx: &AppContext) -> AppResult<WorkflowOutcome> {
    info!("determining repository state");
    let state = RepositoryState::new(ctx.version_control.is_initial_commit().await?);

    info!(initial_commit = state.initial_commit, "fetching staged diff");
    let Some(staged) = ctx.version_control.staged_diff().await? else {
        info!("no staged changes");
        return Ok(WorkflowOutcome::NoChanges);
    };

    let chunks = diff::chunk(&staged, ctx.settings.chunk_threshold);
    info!(
        chunks = chunks.len(),
        diff_len = staged.len(),
        "summarizing staged diff"
    );

    let summaries =
        summarize_chunks(Arc::clone(&ctx.language_model), &ctx.settings, chunks, state).await?;

    info!("polishing combined summary");
    let message = aggregate(ctx.language_model.as_ref(), &ctx.settings, &summaries, state).await?;
    Ok(WorkflowOutcome::Generated(message))
}

/// Summarizes one chunk. A reply without text yields an empty summary.
pub async fn summarize_chunk(
    model: &dyn LanguageModelService,
    settings: &GenerationSettings,
    chunk: &str,
    state: RepositoryState,
) -> AppResult<String> {
    let request = CompletionRequest {
        system: Instructions::summarize(state),
        user: user_payload(chunk),
        model: settings.model.clone(),
        max_tokens: settings.summary_max_tokens,
    };

    let completion = model.complete(request).await?;
    match completion.text() {
        Some(text) => Ok(text.to_string()),
        None => {
            let first = completion.choices.first();
            debug!(
                choices = completion.choices.len(),
                finish_reason = ?first.and_then(|c| c.finish_reason.as_deref()),
                refusal = ?first.and_then(|c| c.refusal.as_deref()),
                "chunk summary came back empty"
            );
            Ok(String::new())
        }
    }
}

/// Summarizes every chunk concurrently, returning summaries in chunk order.
///
/// All tasks are awaited even when some fail; the error of the lowest
/// failing chunk index is returned afterwards.
pub async fn summarize_chunks(
    model: Arc<dyn LanguageModelService>,
    settings: &GenerationSettings,
    chunks: Vec<String>,
    state: RepositoryState,
) -> AppResult<Vec<String>> {
    let limit = Arc::new(Semaphore::new(settings.max_concurrent_requests.max(1)));
    let mut slots: Vec<AppResult<String>> = chunks.iter().map(|_| Ok(String::new())).collect();
    let mut tasks = JoinSet::new();

    for (index, chunk) in chunks.into_iter().enumerate() {
        let model = Arc::clone(&model);
        let settings = settings.clone();
        let limit = Arc::clone(&limit);
        tasks.spawn(async move {
            let summary = match limit.acquire_owned().await {
                Ok(_permit) => {
                    debug!(index, len = chunk.len(), "summarizing chunk");
                    summarize_chunk(model.as_ref(), &settings, &chunk, state).await
                }
                Err(err) => Err(AppError::LanguageModel(format!(
                    "request limiter closed: {err}"
                ))),
            };
            (index, summary)
        });
    }

    let mut task_failure = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, summary)) => slots[index] = summary,
            Err(err) => {
                task_failure.get_or_insert_with(|| {
                    AppError::LanguageModel(format!("summary task failed: {err}"))
                });
            }
        }
    }

    let summaries = slots.into_iter().collect::<AppResult<Vec<_>>>()?;
    match task_failure {
        Some(err) => Err(err),
        None => Ok(summaries),
    }
}

/// Merges chunk summaries into one message with a final polish request.
pub async fn aggregate(
    model: &dyn LanguageModelService,
    settings: &GenerationSettings,
    summaries: &[String],
    state: RepositoryState,
) -> AppResult<FinalMessage> {
    let combined = CombinedSummary::join(summaries);
    debug!(len = combined.as_str().len(), "combined summary");

    let request = CompletionRequest {
        system: Instructions::polish(state),
        user: user_payload(combined.as_str()),
        model: settings.model.clone(),
        max_tokens: settings.polish_max_tokens,
    };

    let completion = model.complete(request).await?;
    completion
        .text()
        .map(|text| FinalMessage(text.to_string()))
        .ok_or(AppError::GenerationFailure)
}
