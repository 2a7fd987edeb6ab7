use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::providers::CONTENT_PLACEHOLDER;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Text generation config
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Prompt templates
    #[serde(default)]
    pub prompts: PromptConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Text generation provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GenerationProvider {
    // @provider: Ollama
    Ollama,
    // @provider: OpenAI
    #[default]
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: LM Studio (OpenAI-compatible local server)
    LMStudio,
}

impl GenerationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::LMStudio => "LM Studio",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::LMStudio => "lmstudio".to_string(),
        }
    }

    // @returns: Whether the provider refuses requests without an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAI | Self::Anthropic)
    }
}

impl std::fmt::Display for GenerationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for GenerationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "lmstudio" => Ok(Self::LMStudio),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: GenerationProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(&provider_type),
            api_key: String::new(),
            endpoint: default_endpoint(&provider_type),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Text generation configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: GenerationProvider,

    /// Available providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens per generated response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: GenerationProvider::default(),
            available_providers: vec![
                ProviderConfig::new(GenerationProvider::Ollama),
                ProviderConfig::new(GenerationProvider::OpenAI),
                ProviderConfig::new(GenerationProvider::Anthropic),
                ProviderConfig::new(GenerationProvider::LMStudio),
            ],
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl GenerationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &GenerationProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration, created with
    /// defaults when missing
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider = self.provider.clone();
        self.provider_config_mut(&provider)
    }

    /// Mutable access to a provider configuration, created with defaults when missing
    pub fn provider_config_mut(&mut self, provider_type: &GenerationProvider) -> &mut ProviderConfig {
        let provider_str = provider_type.to_lowercase_string();
        let position = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(position) => position,
            None => {
                self.available_providers.push(ProviderConfig::new(provider_type.clone()));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[position]
    }

    /// Apply an API key given outside the config file
    ///
    /// An explicit key replaces the stored one. Otherwise the key only fills
    /// an empty slot, so a key kept in the config file wins over the environment.
    pub fn apply_api_key(&mut self, provider_type: &GenerationProvider, key: &str, explicit: bool) {
        let provider_config = self.provider_config_mut(provider_type);
        if explicit || provider_config.api_key.is_empty() {
            provider_config.api_key = key.to_string();
        }
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.model.clone())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| default_model(&self.provider))
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.endpoint.clone())
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or_else(|| default_endpoint(&self.provider))
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_timeout_secs)
    }
}

/// Prompt templates, each with a `{content}` placeholder
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PromptConfig {
    /// One-sentence summary of a chapter
    #[serde(default = "default_chapter_summary_prompt")]
    pub chapter_summary: String,

    /// Short title of a chapter
    #[serde(default = "default_chapter_title_prompt")]
    pub chapter_title: String,

    /// Summary of the whole transcript
    #[serde(default = "default_overall_summary_prompt")]
    pub overall_summary: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            chapter_summary: default_chapter_summary_prompt(),
            chapter_title: default_chapter_title_prompt(),
            overall_summary: default_overall_summary_prompt(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_endpoint(provider: &GenerationProvider) -> String {
    match provider {
        GenerationProvider::Ollama => "http://localhost:11434".to_string(),
        GenerationProvider::OpenAI => "https://api.openai.com/v1".to_string(),
        GenerationProvider::Anthropic => "https://api.anthropic.com".to_string(),
        // LM Studio default server (OpenAI compatible) runs on port 1234 under /v1
        GenerationProvider::LMStudio => "http://localhost:1234/v1".to_string(),
    }
}

fn default_model(provider: &GenerationProvider) -> String {
    match provider {
        GenerationProvider::Ollama => "llama3".to_string(),
        GenerationProvider::OpenAI => "gpt-3.5-turbo-16k".to_string(),
        GenerationProvider::Anthropic => "claude-3-haiku-20240307".to_string(),
        // Placeholder; users should set to the loaded model name in LM Studio
        GenerationProvider::LMStudio => "local-model".to_string(),
    }
}

fn default_chapter_summary_prompt() -> String {
    "Summarize the following chapter in one sentence: {content}".to_string()
}

fn default_chapter_title_prompt() -> String {
    "Generate a short, descriptive title for the following chapter content: {content}".to_string()
}

fn default_overall_summary_prompt() -> String {
    "Provide a brief summary of the following transcript: {content}".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load the configuration, writing a default one first if the file is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save(path)?;
        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let provider = &self.generation.provider;
        if provider.requires_api_key() && self.generation.get_api_key().is_empty() {
            return Err(anyhow!("API key is required for {} provider", provider.display_name()));
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(anyhow!("Temperature must be between 0.0 and 2.0, got {}", self.generation.temperature));
        }

        if self.generation.max_tokens == 0 {
            return Err(anyhow!("max_tokens must be greater than zero"));
        }

        for (name, template) in [
            ("chapter_summary", &self.prompts.chapter_summary),
            ("chapter_title", &self.prompts.chapter_title),
            ("overall_summary", &self.prompts.overall_summary),
        ] {
            if !template.contains(CONTENT_PLACEHOLDER) {
                return Err(anyhow!("Prompt '{}' must contain the {} placeholder", name, CONTENT_PLACEHOLDER));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            generation: GenerationConfig::default(),
            prompts: PromptConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
