use crate::domain::error::AskError;
use crate::domain::traits::LanguageModel;
use crate::infrastructure::config::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

// Chat completions request/response structures
#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ApiError {
    message: String,
}

/// OpenAI-compatible chat completions client
pub struct OpenAiClient {
    client: Client,
    config: LlmConfig,
}

impl OpenAiClient {
    pub fn new(client: Client, config: LlmConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, AskError> {
        let api_key = self.config.api_key.as_deref().unwrap_or("");
        if api_key.is_empty() {
            return Err(AskError::Config("LLM API key not configured".to_string()));
        }

        let request = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Prefer the API's own error message when the body carries one
            let detail = serde_json::from_str::<ChatResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or_else(|| body.chars().take(200).collect());
            return Err(AskError::Api(format!("LLM HTTP {}: {}", status, detail)));
        }

        parse_completion(&body)
    }
}

fn parse_completion(body: &str) -> Result<String, AskError> {
    let response: ChatResponse = serde_json::from_str(body)?;

    if let Some(err) = response.error {
        return Err(AskError::Api(err.message));
    }

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(AskError::Api("LLM returned an empty completion".to_string()));
    }

    Ok(content)
}
