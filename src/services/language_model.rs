use async_trait::async_trait;

use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choice {
    pub content: Option<String>,
    pub finish_reason: Option<String>,
    pub refusal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub choices: Vec<Choice>,
}

impl Completion {
    #[cfg(test)]
    pub fn from_text(text: &str) -> Self {
        Self {
            choices: vec![Choice {
                content: Some(text.to_string()),
                finish_reason: Some("stop".to_string()),
                refusal: None,
            }],
        }
    }

    /// Text of the first choice, if it carries any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> AppResult<Completion>;
}
