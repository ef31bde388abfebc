//! Scripted fakes of the service traits for workflow tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::GenerationSettings;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::services::{
    Completion, CompletionRequest, LanguageModelService, PresentationSink, VersionControlService,
};

pub struct FakeVersionControl {
    initial_commit: Result<bool, String>,
    diff: Option<String>,
}

impl FakeVersionControl {
    pub fn with_diff(initial_commit: bool, diff: &str) -> Self {
        Self {
            initial_commit: Ok(initial_commit),
            diff: Some(diff.to_string()),
        }
    }

    pub fn no_changes(initial_commit: bool) -> Self {
        Self {
            initial_commit: Ok(initial_commit),
            diff: None,
        }
    }

    pub fn failing_count(stderr: &str) -> Self {
        Self {
            initial_commit: Err(stderr.to_string()),
            diff: None,
        }
    }
}

#[async_trait]
impl VersionControlService for FakeVersionControl {
    async fn is_initial_commit(&self) -> AppResult<bool> {
        self.initial_commit
            .clone()
            .map_err(AppError::VersionControl)
    }

    async fn staged_diff(&self) -> AppResult<Option<String>> {
        Ok(self.diff.clone())
    }
}

type Responder = dyn Fn(&CompletionRequest) -> AppResult<Completion> + Send + Sync;
type Delay = dyn Fn(&CompletionRequest) -> Duration + Send + Sync;

/// Answers completion requests from a closure and records every request.
#[derive(Clone)]
pub struct ScriptedModel {
    respond: Arc<Responder>,
    delay: Option<Arc<Delay>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl ScriptedModel {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&CompletionRequest) -> AppResult<Completion> + Send + Sync + 'static,
    {
        Self {
            respond: Arc::new(respond),
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay<F>(mut self, delay: F) -> Self
    where
        F: Fn(&CompletionRequest) -> Duration + Send + Sync + 'static,
    {
        self.delay = Some(Arc::new(delay));
        self
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModelService for ScriptedModel {
    async fn complete(&self, request: CompletionRequest) -> AppResult<Completion> {
        self.requests.lock().unwrap().push(request.clone());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(&request)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        (self.respond)(&request)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Busy(String),
    Idle,
    Clipboard(String),
    Info(String),
    Error(String),
}

#[derive(Default)]
pub struct RecordingPresenter {
    events: Mutex<Vec<Event>>,
    fail_clipboard: bool,
}

impl RecordingPresenter {
    pub fn failing_clipboard() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail_clipboard: true,
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl PresentationSink for RecordingPresenter {
    fn begin_busy(&self, tooltip: &str) {
        self.push(Event::Busy(tooltip.to_string()));
    }

    fn end_busy(&self) {
        self.push(Event::Idle);
    }

    fn copy_to_clipboard(&self, text: &str) -> AppResult<()> {
        if self.fail_clipboard {
            return Err(AppError::Clipboard("no display".to_string()));
        }
        self.push(Event::Clipboard(text.to_string()));
        Ok(())
    }

    fn notify_info(&self, message: &str) {
        self.push(Event::Info(message.to_string()));
    }

    fn notify_error(&self, message: &str) {
        self.push(Event::Error(message.to_string()));
    }
}

pub fn context(version_control: FakeVersionControl, model: ScriptedModel) -> AppContext {
    context_with_presenter(version_control, model, Arc::new(RecordingPresenter::default()))
}

pub fn context_with_presenter(
    version_control: FakeVersionControl,
    model: ScriptedModel,
    presenter: Arc<RecordingPresenter>,
) -> AppContext {
    AppContext::new(
        GenerationSettings::default(),
        Arc::new(version_control),
        Arc::new(model),
        presenter,
    )
}
