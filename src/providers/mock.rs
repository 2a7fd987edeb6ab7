/*!
 * Mock text generator.
 *
 * Simulates a generation provider without any network access:
 * - `MockGenerator::working()` - Echoes a tagged response for every call
 * - `MockGenerator::failing()` - Always fails with an error
 * - `MockGenerator::fail_after(n)` - Succeeds n times, then fails
 * - `MockGenerator::empty()` - Returns empty strings
 *
 * Every call is recorded so tests can inspect the prompts and texts sent.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use super::{render_prompt, TextGenerator};

/// Behavior mode for the mock generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Succeeds for the first `successes` calls, then fails
    FailAfter { successes: usize },
    /// Always fails with an error
    Failing,
    /// Returns an empty response
    Empty,
}

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    /// Template as passed in
    pub prompt_template: String,
    /// Text as passed in
    pub text: String,
}

/// Mock generator for tests and dry runs
#[derive(Debug, Clone)]
pub struct MockGenerator {
    /// Behavior mode
    behavior: MockBehavior,
    /// Request counter shared between clones
    request_count: Arc<AtomicUsize>,
    /// Calls received, shared between clones
    calls: Arc<Mutex<Vec<MockCall>>>,
    /// Custom response generator (optional)
    custom_response: Option<fn(&str, &str) -> String>,
}

impl MockGenerator {
    /// Create a new mock generator with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            custom_response: None,
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn fail_after(successes: usize) -> Self {
        Self::new(MockBehavior::FailAfter { successes })
    }

    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom response generator, called with (template, text)
    pub fn with_custom_response(mut self, generator: fn(&str, &str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Number of calls received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Snapshot of all calls received so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    fn respond(&self, prompt_template: &str, text: &str) -> String {
        match self.custom_response {
            Some(generator) => generator(prompt_template, text),
            None => format!("[GENERATED] {}", render_prompt(prompt_template, text)),
        }
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt_template: &str, text: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(MockCall {
            prompt_template: prompt_template.to_string(),
            text: text.to_string(),
        });

        match self.behavior {
            MockBehavior::Working => Ok(self.respond(prompt_template, text)),

            MockBehavior::FailAfter { successes } if count >= successes => Err(ProviderError::ApiError {
                status_code: 503,
                message: format!("Simulated failure (request #{})", count + 1),
            }),

            MockBehavior::FailAfter { .. } => Ok(self.respond(prompt_template, text)),

            MockBehavior::Failing => Err(ProviderError::ApiError {
                status_code: 500,
                message: "Simulated provider failure".to_string(),
            }),

            MockBehavior::Empty => Ok(String::new()),
        }
    }
}
