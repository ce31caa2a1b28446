pub mod cohere;
pub mod gemini;
pub mod openai;

use std::time::Duration;

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::{LLMConfig, LLMProvider};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use cohere::CohereClient;
use gemini::GeminiClient;
use openai::OpenAIClient;

/// A text-generation backend: one prompt in, one generated text out.
#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String>;
}

pub struct RouterClient {
    cohere: CohereClient,
    openai: OpenAIClient,
    gemini: GeminiClient,
}

impl RouterClient {
    pub fn new(timeout: Duration) -> Self {
        let http = http_client(timeout);
        Self {
            cohere: CohereClient::with_client(http.clone()),
            openai: OpenAIClient::with_client(http.clone()),
            gemini: GeminiClient::with_client(http),
        }
    }
}

#[async_trait]
impl LLMClient for RouterClient {
    async fn generate(&self, config: &LLMConfig, system: &str, user: &str) -> Result<String> {
        match config.provider {
            LLMProvider::Cohere => self.cohere.generate(config, system, user).await,
            LLMProvider::OpenAI => self.openai.generate(config, system, user).await,
            LLMProvider::Gemini => self.gemini.generate(config, system, user).await,
        }
    }
}

pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Turn a non-2xx response into an `LLMError` carrying status and body.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    Err(AppError::LLMError(format!("API error ({}): {}", status, text)))
}

/// Send a JSON body and decode the JSON reply, mapping every failure to `LLMError`.
pub(crate) async fn post_json<B, R>(request: reqwest::RequestBuilder, body: &B) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = request
        .json(body)
        .send()
        .await
        .map_err(|e| AppError::LLMError(format!("Request failed: {}", e)))?;
    let response = ensure_success(response).await?;

    response
        .json()
        .await
        .map_err(|e| AppError::LLMError(format!("Failed to parse JSON: {}", e)))
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    if base_url.ends_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joining() {
        assert_eq!(endpoint("https://api.x/v1", "chat"), "https://api.x/v1/chat");
        assert_eq!(endpoint("https://api.x/v1/", "chat"), "https://api.x/v1/chat");
    }
}
