/*!
 * Text generation providers.
 *
 * This module contains client implementations for various LLM providers:
 * - Ollama: Local LLM server
 * - OpenAI: OpenAI API integration (also used for LM Studio)
 * - Anthropic: Anthropic API integration
 * - Mock: Scripted generator for tests and offline runs
 *
 * The chaptering pipeline only sees the `TextGenerator` capability, so it
 * never depends on a concrete provider.
 */

use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Placeholder replaced by the input text in prompt templates
pub const CONTENT_PLACEHOLDER: &str = "{content}";

/// Capability used by the chapter processor: turn a prompt template and a
/// text into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt_template` with `{content}` replaced by `text`
    async fn generate(&self, prompt_template: &str, text: &str) -> Result<String, ProviderError>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for &T {
    async fn generate(&self, prompt_template: &str, text: &str) -> Result<String, ProviderError> {
        (**self).generate(prompt_template, text).await
    }
}

/// Common trait for all LLM provider clients
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably by the generation service.
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// The request type for this provider
    type Request: Send + Sync;

    /// The response type for this provider
    type Response: Send + Sync;

    /// Complete a request using this provider
    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError>;

    /// Test the connection to the provider
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Extract text from the provider response
    fn extract_text(response: &Self::Response) -> String;
}

/// Fill a prompt template with the given text
pub fn render_prompt(prompt_template: &str, text: &str) -> String {
    prompt_template.replace(CONTENT_PLACEHOLDER, text)
}

/// Map a non-success HTTP status to a provider error
pub(crate) fn status_error(provider: &str, status: StatusCode, body: String) -> ProviderError {
    let message = format!("{} API error ({}): {}", provider, status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::AuthenticationError(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimitExceeded(message),
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message,
        },
    }
}

/// Map a transport failure to a provider error
pub(crate) fn transport_error(provider: &str, error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(format!("Failed to reach {}: {}", provider, error))
    } else {
        ProviderError::RequestFailed(format!("Failed to send request to {}: {}", provider, error))
    }
}

pub mod ollama;
pub mod openai;
pub mod anthropic;
pub mod mock;
