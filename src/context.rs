use std::sync::Arc;

use crate::config::GenerationSettings;
use crate::services::{LanguageModelService, PresentationSink, VersionControlService};

#[derive(Clone)]
pub struct AppContext {
    pub settings: GenerationSettings,
    pub version_control: Arc<dyn VersionControlService>,
    pub language_model: Arc<dyn LanguageModelService>,
    pub presentation: Arc<dyn PresentationSink>,
}

impl AppContext {
    pub fn new(
        settings: GenerationSettings,
        version_control: Arc<dyn VersionControlService>,
        language_model: Arc<dyn LanguageModelService>,
        presentation: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            settings,
            version_control,
            language_model,
            presentation,
        }
    }
}
