pub mod language_model;
pub mod presentation;
pub mod version_control;

pub use language_model::{Choice, Completion, CompletionRequest, LanguageModelService};
pub use presentation::PresentationSink;
pub use version_control::VersionControlService;
