/*!
 * Text generation service.
 *
 * This module contains the `GenerationService` struct, which turns the
 * configured provider into a `TextGenerator` that the chapter processor
 * can drive without knowing which backend answers the prompts.
 */

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::time::Instant;
use url::Url;

use crate::app_config::{GenerationConfig, GenerationProvider};
use crate::errors::ProviderError;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::ollama::{GenerationRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::{render_prompt, Provider, TextGenerator};

/// Normalize an endpoint string into a base URL with a scheme
fn normalize_endpoint(endpoint: &str) -> Result<String> {
    if endpoint.is_empty() {
        return Err(anyhow!("Endpoint cannot be empty"));
    }

    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Url::parse(endpoint)?
    } else {
        Url::parse(&format!("http://{}", endpoint))?
    };

    if url.host_str().is_none() {
        return Err(anyhow!("Invalid host in endpoint: {}", endpoint));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// Generation provider implementation variants
#[derive(Debug)]
enum GenerationProviderImpl {
    /// Ollama LLM service
    Ollama {
        /// Client instance
        client: Ollama,
    },

    /// OpenAI API service
    OpenAI {
        /// Client instance
        client: OpenAI,
    },

    /// LM Studio local server (OpenAI-compatible)
    LMStudio {
        /// Client instance (OpenAI-compatible)
        client: OpenAI,
    },

    /// Anthropic API service
    Anthropic {
        /// Client instance
        client: Anthropic,
    },
}

/// Generation service backed by one configured provider
#[derive(Debug)]
pub struct GenerationService {
    /// Provider implementation
    provider: GenerationProviderImpl,

    /// Configuration for the generation service
    pub config: GenerationConfig,
}

impl GenerationService {
    /// Create a new generation service with the given configuration
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let model = config.get_model();
        let endpoint = normalize_endpoint(&config.get_endpoint())?;
        let timeout_secs = config.get_timeout_secs();

        let provider = match config.provider {
            GenerationProvider::Ollama => GenerationProviderImpl::Ollama {
                client: Ollama::new(endpoint, model, timeout_secs),
            },
            GenerationProvider::OpenAI => GenerationProviderImpl::OpenAI {
                client: OpenAI::new(config.get_api_key(), endpoint, model, timeout_secs),
            },
            GenerationProvider::LMStudio => {
                // LM Studio often doesn't require an API key; use a default if empty
                let api_key = {
                    let k = config.get_api_key();
                    if k.is_empty() { "lm-studio".to_string() } else { k }
                };

                GenerationProviderImpl::LMStudio {
                    client: OpenAI::new(api_key, endpoint, model, timeout_secs),
                }
            },
            GenerationProvider::Anthropic => GenerationProviderImpl::Anthropic {
                client: Anthropic::new(config.get_api_key(), endpoint, model, timeout_secs),
            },
        };

        Ok(Self { provider, config })
    }

    /// Test the connection to the generation provider
    pub async fn test_connection(&self) -> Result<()> {
        info!("Testing connection to {} with model {}",
              self.config.provider.display_name(), self.config.get_model());

        let result = match &self.provider {
            GenerationProviderImpl::Ollama { client } => client.test_connection().await,
            GenerationProviderImpl::OpenAI { client } | GenerationProviderImpl::LMStudio { client } => {
                client.test_connection().await
            },
            GenerationProviderImpl::Anthropic { client } => client.test_connection().await,
        };

        result.map_err(|e| anyhow!("Failed to connect to {}: {}", self.config.provider.display_name(), e))
    }

    /// Send a fully rendered prompt to the provider and return the generated text
    pub async fn complete_prompt(&self, prompt: &str) -> Result<String, ProviderError> {
        let start_time = Instant::now();
        let model = self.config.get_model();
        let temperature = self.config.temperature;
        let max_tokens = self.config.max_tokens;

        let text = match &self.provider {
            GenerationProviderImpl::Ollama { client } => {
                let request = GenerationRequest::new(model, prompt)
                    .temperature(temperature)
                    .max_tokens(max_tokens);
                let response = client.complete(request).await?;
                Ollama::extract_text(&response)
            },
            GenerationProviderImpl::OpenAI { client } | GenerationProviderImpl::LMStudio { client } => {
                let request = OpenAIRequest::new(model)
                    .add_message("user", prompt)
                    .temperature(temperature)
                    .max_tokens(max_tokens);
                let response = client.complete(request).await?;
                if response.choices.is_empty() {
                    return Err(ProviderError::ParseError(
                        "OpenAI-compatible provider returned empty response".to_string(),
                    ));
                }
                OpenAI::extract_text_from_response(&response)
            },
            GenerationProviderImpl::Anthropic { client } => {
                let request = AnthropicRequest::new(model, max_tokens)
                    .add_message("user", prompt)
                    .temperature(temperature);
                let response = client.complete(request).await?;
                Anthropic::extract_text_from_response(&response)
            },
        };

        debug!("{} response received in {:?}", self.config.provider.display_name(), start_time.elapsed());
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GenerationService {
    async fn generate(&self, prompt_template: &str, text: &str) -> Result<String, ProviderError> {
        self.complete_prompt(&render_prompt(prompt_template, text)).await
    }
}
