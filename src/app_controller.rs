use anyhow::{anyhow, Context, Result};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};

use crate::app_config::Config;
use crate::chapter_processor::ChapterProcessor;
use crate::chapters::segment;
use crate::file_utils::FileManager;
use crate::generation_service::GenerationService;
use crate::providers::TextGenerator;
use crate::chapters::truncate_chars;
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for transcript chaptering

// @const: Characters of chapter text shown in an outline line
const OUTLINE_PREVIEW_CHARS: usize = 80;

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// A report was written to this path
    Written(PathBuf),
    /// A report already existed at this path and was left alone
    Skipped(PathBuf),
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    // @returns: Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the main workflow on a file or a directory
    pub async fn run(&self, input: PathBuf, force_overwrite: bool, chapters_only: bool) -> Result<()> {
        if chapters_only {
            return self.run_outline(&input);
        }

        self.config.validate()?;
        let service = GenerationService::new(self.config.generation.clone())?;
        info!("Using {} with model {}",
              self.config.generation.provider.display_name(), self.config.generation.get_model());

        service.test_connection().await
            .context("Provider is not reachable, check the endpoint and API key in the config file")?;

        self.run_with_generator(input, service, force_overwrite).await
    }

    /// Run the workflow with a caller-supplied generator
    pub async fn run_with_generator<G: TextGenerator>(&self, input: PathBuf, generator: G, force_overwrite: bool) -> Result<()> {
        let processor = ChapterProcessor::new(generator).with_prompts(self.config.prompts.clone());

        if FileManager::dir_exists(&input) {
            return self.run_folder(&processor, input, force_overwrite).await;
        }

        self.process_file(&processor, &input, force_overwrite).await?;
        Ok(())
    }

    /// Resolve the SRT transcript for an input file
    ///
    /// SRT files are used directly. Audio files need a `<stem>_transcript.srt`
    /// companion next to them.
    pub fn resolve_transcript(input: &Path) -> Result<PathBuf> {
        if !input.exists() {
            return Err(anyhow!("Input file does not exist: {:?}", input));
        }

        if FileManager::has_extension(input, "srt") {
            return Ok(input.to_path_buf());
        }

        if FileManager::is_audio_file(input) {
            let status = FileManager::file_status(input);
            debug!("File status for {:?}: audio={} transcript={} ready={}",
                   input, status.audio.is_some(), status.transcript_txt.is_some(), status.is_ready());

            return status.srt
                .ok_or_else(|| anyhow!("No SRT transcript found next to {:?}", input));
        }

        Err(anyhow!("Unsupported input file: {:?}", input))
    }

    /// Process one input file and write its report unless one exists
    pub async fn process_file<G: TextGenerator>(
        &self,
        processor: &ChapterProcessor<G>,
        input: &Path,
        force_overwrite: bool,
    ) -> Result<FileOutcome> {
        let start_time = std::time::Instant::now();
        let output_path = FileManager::report_output_path(input);

        if output_path.exists() && !force_overwrite {
            warn!("Skipping {}, report already exists (use -f to force overwrite)", input.display());
            return Ok(FileOutcome::Skipped(output_path));
        }

        let transcript = Self::resolve_transcript(input)?;
        let report = processor.process_file(&transcript).await?;

        for line in report.table_of_contents() {
            println!("{}", line);
        }

        FileManager::write_to_file(&output_path, &report.to_json()?)?;
        info!("Success: {} ({})", output_path.display(), Self::format_duration(start_time.elapsed()));

        Ok(FileOutcome::Written(output_path))
    }

    /// Chapter outline lines for a transcript, without generated titles
    pub fn chapter_outline(transcript: &Path) -> Result<Vec<String>> {
        let collection = SubtitleCollection::from_file(transcript)?;
        let incomplete = collection.incomplete_count();
        if incomplete > 0 {
            warn!("{} of {} entries in {} lack a timecode or text",
                  incomplete, collection.entries.len(), transcript.display());
        }

        let chapters = segment(&collection.entries)?;

        Ok(chapters
            .iter()
            .map(|chapter| format!(
                "{} ({}): {}",
                chapter.title,
                chapter.time_range(),
                truncate_chars(&chapter.text, OUTLINE_PREVIEW_CHARS)
            ))
            .collect())
    }

    fn run_outline(&self, input: &Path) -> Result<()> {
        if !FileManager::dir_exists(input) {
            let transcript = Self::resolve_transcript(input)?;
            let lines = Self::chapter_outline(&transcript)
                .with_context(|| format!("Failed to chapter {}", transcript.display()))?;
            Self::print_outline(&transcript, &lines);
            return Ok(());
        }

        for transcript in FileManager::find_files(input, "srt")? {
            match Self::chapter_outline(&transcript) {
                Ok(lines) => Self::print_outline(&transcript, &lines),
                Err(e) => error!("Error processing file {}: {}", transcript.display(), e),
            }
        }

        Ok(())
    }

    fn print_outline(transcript: &Path, lines: &[String]) {
        println!("{}", transcript.display());
        for line in lines {
            println!("  {}", line);
        }
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the workflow in folder mode, processing every SRT file in a directory
    /// Files that already have a report will be skipped
    async fn run_folder<G: TextGenerator>(
        &self,
        processor: &ChapterProcessor<G>,
        input_dir: PathBuf,
        force_overwrite: bool,
    ) -> Result<()> {
        let start_time = std::time::Instant::now();

        let srt_files = FileManager::find_files(&input_dir, "srt")?;
        if srt_files.is_empty() {
            return Err(anyhow!("No SRT files found in directory: {:?}", input_dir));
        }

        let folder_pb = ProgressBar::new(srt_files.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing files");

        let mut success_count = 0;
        let mut error_count = 0;
        let mut skip_count = 0;

        for srt_file in srt_files.iter() {
            let file_name = srt_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            match self.process_file(processor, srt_file, force_overwrite).await {
                Ok(FileOutcome::Skipped(_)) => skip_count += 1,
                Ok(FileOutcome::Written(_)) => success_count += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    error_count += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!("Folder processing completed in {}: {} processed, {} skipped, {} errors",
              Self::format_duration(start_time.elapsed()), success_count, skip_count, error_count);

        Ok(())
    }
}
