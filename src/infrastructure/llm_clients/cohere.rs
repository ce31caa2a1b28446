use super::{endpoint, post_json, LLMClient};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct CohereChatRequest<'a> {
    model: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    preamble: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f32>,
}

#[derive(Deserialize)]
struct CohereChatResponse {
    text: String,
}

/// Client for the Cohere v1 chat endpoint
pub struct CohereClient {
    client: reqwest::Client,
}

impl CohereClient {
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn api_key(config: &LLMConfig) -> Result<String> {
        config
            .api_key
            .clone()
            .ok_or_else(|| AppError::LLMError("Missing API key for Cohere".to_string()))
    }

    fn request<'a>(config: &'a LLMConfig, system: &'a str, user: &'a str) -> CohereChatRequest<'a> {
        CohereChatRequest {
            model: &config.model,
            message: user,
            preamble: Some(system).filter(|s| !s.trim().is_empty()),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            presence_penalty: config.presence_penalty,
        }
    }
}

#[async_trait]
impl LLMClient for CohereClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let url = endpoint(&config.base_url, "chat");
        let body = Self::request(config, system, user);

        let request = self.client.post(&url).bearer_auth(api_key);
        let json: CohereChatResponse = post_json(request, &body).await?;

        Ok(json.text)
    }
}
