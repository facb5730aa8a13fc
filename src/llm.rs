use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::openai;

use crate::config::Config;
use crate::error::{DigestError, Result};

/// A language model that answers a single system + user exchange.
#[async_trait]
pub trait SummarizationService {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String>;
}

/// [`SummarizationService`] backed by the OpenAI chat API.
pub struct OpenAiService {
    client: openai::Client<reqwest::Client>,
    model: String,
    temperature: f64,
}

impl OpenAiService {
    /// Creates an OpenAI client from the API key and model settings in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let client: openai::Client<reqwest::Client> =
            openai::Client::new(config.api_key.as_str())
                .map_err(|e| DigestError::Service(format!("failed to create OpenAI client: {}", e)))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl SummarizationService for OpenAiService {
    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(system_prompt)
            .temperature(self.temperature)
            .build();

        agent
            .prompt(user_text)
            .await
            .map_err(|e| DigestError::Service(e.to_string()))
    }
}
