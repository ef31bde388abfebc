use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::{Choice, Completion, CompletionRequest, LanguageModelService};

pub struct OpenAiClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration(
                    "OpenAI API key not configured (set OPENAI_API_KEY or run `bcm config init`)"
                        .to_string(),
                )
            })
    }

    fn completions_endpoint(base_url: &str) -> String {
        format!("{}/chat/completions", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LanguageModelService for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> AppResult<Completion> {
        let api_key = self.api_key()?;
        let body = ChatCompletionRequest::from(&request);

        debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            system_len = request.system.len(),
            user_len = request.user.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(Self::completions_endpoint(&self.base_url))
            .header(AUTHORIZATION, format!("Bearer {api_key}"))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to call OpenAI: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::LanguageModel(format!(
                "OpenAI responded with {status}: {body}"
            )));
        }

        let payload: ChatCompletionResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse OpenAI response: {err}"))
        })?;

        Ok(payload.into())
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
}

impl<'a> From<&'a CompletionRequest> for ChatCompletionRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: request.max_tokens,
        }
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl From<ChatCompletionResponse> for Completion {
    fn from(response: ChatCompletionResponse) -> Self {
        let choices = response
            .choices
            .into_iter()
            .map(|choice| {
                let (content, refusal) = choice
                    .message
                    .map(|message| (message.content, message.refusal))
                    .unwrap_or((None, None));
                Choice {
                    content,
                    finish_reason: choice.finish_reason,
                    refusal,
                }
            })
            .collect();
        Completion { choices }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system: "be terse".to_string(),
            user: "diff:\n+foo".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 2048,
        }
    }

    fn client(server: &MockServer, api_key: Option<&str>) -> OpenAiClient {
        OpenAiClient::new(
            format!("{}/v1/", server.uri()),
            api_key.map(str::to_string),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn sends_chat_request_and_parses_choices() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "max_tokens": 2048,
                "messages": [
                    { "role": "system", "content": "be terse" },
                    { "role": "user", "content": "diff:\n+foo" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "- add foo", "refusal": null },
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let completion = client(&server, Some("sk-test"))
            .complete(request())
            .await
            .unwrap();

        assert_eq!(completion.text(), Some("- add foo"));
        assert_eq!(completion.choices[0].finish_reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn refusal_is_returned_without_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{
                    "message": { "role": "assistant", "content": null, "refusal": "no" },
                    "finish_reason": "stop"
                }]
            })))
            .mount(&server)
            .await;

        let completion = client(&server, Some("sk-test"))
            .complete(request())
            .await
            .unwrap();

        assert_eq!(completion.text(), None);
        assert_eq!(completion.choices[0].refusal.as_deref(), Some("no"));
    }

    #[tokio::test]
    async fn http_error_status_is_a_language_model_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let err = client(&server, Some("sk-test"))
            .complete(request())
            .await
            .unwrap_err();

        match err {
            AppError::LanguageModel(message) => assert!(message.contains("bad key")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_api_key_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server, None).complete(request()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn slow_responses_time_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "choices": [] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = OpenAiClient::new(
            server.uri(),
            Some("sk-test".to_string()),
            Duration::from_millis(100),
        )
        .unwrap();

        assert!(matches!(
            client.complete(request()).await,
            Err(AppError::LanguageModel(_))
        ));
    }
}
