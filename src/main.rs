// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, FromArgMatches, Subcommand};
use clap::parser::{ArgMatches, ValueSource};
use clap_complete::{generate, Shell};

use chappie::app_config::{self, Config, GenerationProvider};
use chappie::app_controller::Controller;

/// CLI Wrapper for GenerationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGenerationProvider {
    Ollama,
    OpenAI,
    Anthropic,
    LMStudio,
}

impl From<CliGenerationProvider> for GenerationProvider {
    fn from(cli_provider: CliGenerationProvider) -> Self {
        match cli_provider {
            CliGenerationProvider::Ollama => GenerationProvider::Ollama,
            CliGenerationProvider::OpenAI => GenerationProvider::OpenAI,
            CliGenerationProvider::Anthropic => GenerationProvider::Anthropic,
            CliGenerationProvider::LMStudio => GenerationProvider::LMStudio,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for chappie
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Chappie - chapters, summaries and titles for SRT transcripts
///
/// Splits a transcript into chapters and asks an AI provider for a title
/// and a summary of each chapter, plus a summary of the whole transcript.
#[derive(Parser, Debug)]
#[command(name = "chappie")]
#[command(version)]
#[command(about = "AI-assisted chaptering of SRT transcripts")]
#[command(long_about = "Chappie splits SRT transcripts into chapters and generates titles and summaries with AI providers.

EXAMPLES:
    chappie talk.srt                            # Chapter a transcript using default config
    chappie talk.mp3                            # Use talk_transcript.srt next to the audio file
    chappie --chapters-only talk.srt            # Print chapters without calling a provider
    chappie -p ollama -m llama3 talk.srt        # Use specific provider and model
    chappie -f /transcripts/                    # Process a directory, overwriting reports
    chappie completions bash > chappie.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.

OUTPUT:
    Each transcript gets a <name>.chapters.json report next to its input file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input SRT file, audio file with a transcript, or directory
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Print the chapters without generating titles or summaries
    #[arg(long)]
    chapters_only: bool,

    /// Force overwrite of existing reports
    #[arg(short, long)]
    force_overwrite: bool,

    /// Generation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliGenerationProvider>,

    /// Model name to use for generation
    #[arg(short, long)]
    model: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// OpenAI API key (the flag overrides conf.json, the env var only fills an empty key)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: Option<String>,

    /// Anthropic API key (the flag overrides conf.json, the env var only fills an empty key)
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    anthropic_api_key: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(record.level()),
                now,
                Self::get_emoji_for_level(record.level()),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace lets every record through; the effective level is set with set_max_level below
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let matches = CommandLineOptions::command().get_matches();
    let cli = CommandLineOptions::from_arg_matches(&matches)?;

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "chappie", &mut std::io::stdout());
        return Ok(());
    }

    let input_path = cli.input_path.clone().ok_or_else(|| {
        anyhow!("INPUT_PATH is required when no subcommand is specified")
    })?;

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&cli, &matches)?;

    // If log level was not set via command line, update it from config now
    if cli.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    if !input_path.exists() {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    let controller = Controller::with_config(config)?;
    controller.run(input_path, cli.force_overwrite, cli.chapters_only).await
        .context("Chaptering failed")?;

    Ok(())
}

// Load or create configuration, then apply command line overrides
fn load_config(cli: &CommandLineOptions, matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(provider) = &cli.provider {
        config.generation.provider = provider.clone().into();
    }

    if let Some(model) = &cli.model {
        config.generation.active_provider_config_mut().model = model.clone();
    }

    for (provider, arg_id, key) in [
        (GenerationProvider::OpenAI, "openai_api_key", &cli.openai_api_key),
        (GenerationProvider::Anthropic, "anthropic_api_key", &cli.anthropic_api_key),
    ] {
        if let Some(key) = key {
            let explicit = matches.value_source(arg_id) == Some(ValueSource::CommandLine);
            config.generation.apply_api_key(&provider, key, explicit);
        }
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}
