use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LLMProvider {
    Cohere,
    /// Any OpenAI-compatible `/chat/completions` endpoint
    OpenAI,
    Gemini,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(default)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub base_url: String,
    #[validate(length(min = 1))]
    pub model: String,
    pub api_key: Option<String>,
    #[validate(range(min = 1))]
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub presence_penalty: Option<f32>,
    #[validate(range(min = 1))]
    pub timeout_secs: u64,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: LLMProvider::Cohere,
            base_url: "https://api.cohere.com/v1".to_string(),
            model: "command-r".to_string(),
            api_key: None,
            max_tokens: Some(400),
            temperature: Some(0.3),
            presence_penalty: Some(0.5),
            timeout_secs: 120,
        }
    }
}
