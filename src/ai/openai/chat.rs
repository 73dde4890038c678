use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use crate::ai::ChatService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub const DEFAULT_TEMPERATURE: f64 = 0.7;

pub struct OpenAiChatClient {
    http: OpenAiHttpClient,
    model: String,
    temperature: f64,
}

impl OpenAiChatClient {
    pub fn new(api_key: String, model: String, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            http: OpenAiHttpClient::new(api_key, timeout)?,
            model,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ChatService for OpenAiChatClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            temperature: self.temperature,
        };

        tracing::debug!(model = %self.model, "Sending chat completion request");
        let response = self.http.chat_completion(&request).await?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider("No response from OpenAI chat API".to_string()))?;
        tracing::debug!(finish_reason = ?choice.finish_reason, "Chat completion received");

        choice
            .message
            .content
            .map(|text| text.trim().to_string())
            .ok_or_else(|| Error::AiProvider("No content in OpenAI chat response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(server: &MockServer, api_key: &str, model: &str) -> OpenAiChatClient {
        OpenAiChatClient::new(api_key.to_string(), model.to_string(), None)
            .unwrap()
            .with_base_url(server.uri())
    }

    fn completion(content: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_complete_trims_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("Authorization", "Bearer test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("\n\n  Hello there!  \n")),
            )
            .mount(&server)
            .await;

        let client = make_client(&server, "test-key", "gpt-3.5-turbo");
        let output = client.complete("Say hello").await.unwrap();
        assert_eq!(output, "Hello there!");
    }

    #[tokio::test]
    async fn test_complete_sends_single_user_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [{ "role": "user", "content": "What is Rust?" }],
                "temperature": 0.7
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("A language")))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server, "key", "gpt-3.5-turbo");
        client.complete("What is Rust?").await.unwrap();
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let client = make_client(&server, "bad-key", "gpt-3.5-turbo");
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_empty_choices_returns_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server, "key", "gpt-3.5-turbo");
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_malformed_body_returns_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"choices\": ["))
            .mount(&server)
            .await;

        let client = make_client(&server, "key", "gpt-3.5-turbo");
        let err = client.complete("hi").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }
}
