/*!
 * Tests for application configuration
 */

use anyhow::Result;
use chappie::app_config::{Config, GenerationProvider, LogLevel, PromptConfig};
use crate::common;

/// Test that a missing config file is created with defaults
#[test]
fn test_load_or_create_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let config = Config::load_or_create(&path)?;

    assert!(path.exists());
    assert_eq!(config.generation.provider, GenerationProvider::OpenAI);
    let reloaded = Config::load(&path)?;
    assert_eq!(reloaded.prompts, PromptConfig::default());
    assert_eq!(reloaded.generation.available_providers.len(), 4);
    Ok(())
}

/// Test that saved changes survive a reload
#[test]
fn test_save_then_load_shouldKeepProviderSettings() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.generation.provider = GenerationProvider::Ollama;
    config.generation.active_provider_config_mut().model = "mistral".to_string();
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::load(&path)?;

    assert_eq!(loaded.generation.provider, GenerationProvider::Ollama);
    assert_eq!(loaded.generation.get_model(), "mistral");
    assert_eq!(loaded.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that a malformed file is reported with its path
#[test]
fn test_load_withInvalidJson_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", "{ not json")?;

    let error = Config::load(&path).unwrap_err();

    assert!(error.to_string().contains("conf.json"));
    Ok(())
}

/// Test provider lookups and defaults
#[test]
fn test_provider_lookups_shouldFallBackToDefaults() {
    let mut config = Config::default();
    config.generation.provider = GenerationProvider::LMStudio;
    config.generation.available_providers.clear();

    assert_eq!(config.generation.get_endpoint(), "http://localhost:1234/v1");
    assert_eq!(config.generation.get_api_key(), "");
    assert!(config.generation.get_active_provider_config().is_none());

    config.generation.active_provider_config_mut().api_key = "local".to_string();
    assert_eq!(config.generation.get_api_key(), "local");
}

/// Test validation rules
#[test]
fn test_validate_shouldCheckKeysAndTemplates() {
    let mut config = Config::default();
    config.generation.provider_config_mut(&GenerationProvider::OpenAI).api_key = "sk-test".to_string();
    assert!(config.validate().is_ok());

    config.generation.temperature = 3.0;
    assert!(config.validate().is_err());
    config.generation.temperature = 0.7;

    config.generation.max_tokens = 0;
    assert!(config.validate().is_err());
    config.generation.max_tokens = 1000;

    config.prompts.overall_summary = "Summarize".to_string();
    assert!(config.validate().is_err());
}

/// Test explicit keys replace stored ones and environment keys only fill gaps
#[test]
fn test_apply_api_key_shouldRespectPrecedence() {
    let mut config = Config::default();
    config.generation.provider_config_mut(&GenerationProvider::OpenAI).api_key = "from-file".to_string();

    config.generation.apply_api_key(&GenerationProvider::OpenAI, "from-env", false);
    assert_eq!(config.generation.provider_config_mut(&GenerationProvider::OpenAI).api_key, "from-file");

    config.generation.apply_api_key(&GenerationProvider::OpenAI, "from-flag", true);
    assert_eq!(config.generation.provider_config_mut(&GenerationProvider::OpenAI).api_key, "from-flag");

    config.generation.apply_api_key(&GenerationProvider::Anthropic, "from-env", false);
    assert_eq!(config.generation.provider_config_mut(&GenerationProvider::Anthropic).api_key, "from-env");
}

/// Test log level mapping
#[test]
fn test_log_level_shouldMapToLevelFilter() {
    assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
    assert_eq!(LogLevel::default().to_level_filter(), log::LevelFilter::Info);
}
