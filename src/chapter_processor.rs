/*!
 * Chapter processing pipeline.
 *
 * Turns raw SRT content into a `ChapterReport`:
 * 1. parse the transcript and segment it into chapters
 * 2. ask the generator for a one-sentence summary of every chapter
 * 3. ask for a summary of the whole transcript
 * 4. ask for a title for every chapter and store it on the chapter
 *
 * Generation runs sequentially in chapter order. The first provider error
 * aborts the run.
 */

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::app_config::PromptConfig;
use crate::chapters::{self, truncate_chars, Chapter, SUMMARY_CONTEXT_CHARS};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::providers::TextGenerator;
use crate::subtitle_processor::SubtitleCollection;

/// Result of processing one transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterReport {
    /// Chapters with generated titles
    pub chapters: Vec<Chapter>,
    /// One summary per chapter, in chapter order
    pub chapter_summaries: Vec<String>,
    /// Summary of the whole transcript
    pub overall_summary: String,
}

impl ChapterReport {
    /// One line per chapter: `Chapter {i}: {title} (HH:MM:SS - HH:MM:SS)`
    pub fn table_of_contents(&self) -> Vec<String> {
        self.chapters
            .iter()
            .enumerate()
            .map(|(i, chapter)| format!("Chapter {}: {} ({})", i + 1, chapter.title, chapter.time_range()))
            .collect()
    }

    /// Pretty-printed JSON rendering of the report
    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AppError::Unknown(format!("Failed to serialize chapter report: {}", e)))
    }
}

/// Parse and segment SRT content without any generation
pub fn build_chapters(content: &str) -> Result<Vec<Chapter>, AppError> {
    let entries = SubtitleCollection::parse_srt_string(content)?;
    debug!("Parsed {} subtitle entries", entries.len());
    Ok(chapters::segment(&entries)?)
}

/// Drives a `TextGenerator` over the chapters of a transcript
pub struct ChapterProcessor<G: TextGenerator> {
    /// Generator answering every prompt
    generator: G,
    /// Prompt templates
    prompts: PromptConfig,
}

impl<G: TextGenerator> ChapterProcessor<G> {
    /// Create a processor with the default prompt templates
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            prompts: PromptConfig::default(),
        }
    }

    /// Replace the prompt templates
    pub fn with_prompts(mut self, prompts: PromptConfig) -> Self {
        self.prompts = prompts;
        self
    }

    /// Run the full pipeline over SRT content
    pub async fn process_srt(&self, content: &str) -> Result<ChapterReport, AppError> {
        let mut chapters = build_chapters(content)?;
        info!("Segmented transcript into {} chapters", chapters.len());

        let chapter_summaries = self.generate_summaries(&chapters).await?;
        let overall_summary = self.generate_overall_summary(content).await?;
        let titles = self.generate_titles(&chapters).await?;

        for (chapter, title) in chapters.iter_mut().zip(titles) {
            chapter.set_title(title);
        }

        Ok(ChapterReport {
            chapters,
            chapter_summaries,
            overall_summary,
        })
    }

    /// Read and process one SRT file
    pub async fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<ChapterReport, AppError> {
        let path = path.as_ref();
        info!("Processing {}", path.display());
        let content = FileManager::read_to_string(path)?;
        self.process_srt(&content).await
    }

    /// Process every `.srt` file directly inside `dir`, keyed by file name
    pub async fn process_directory<P: AsRef<Path>>(&self, dir: P) -> Result<BTreeMap<String, ChapterReport>, AppError> {
        let mut results = BTreeMap::new();

        for path in FileManager::find_files(dir, "srt")? {
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_default();
            let report = self.process_file(&path).await?;
            results.insert(file_name, report);
        }

        Ok(results)
    }

    async fn generate_summaries(&self, chapters: &[Chapter]) -> Result<Vec<String>, AppError> {
        let mut summaries = Vec::with_capacity(chapters.len());
        for (i, chapter) in chapters.iter().enumerate() {
            debug!("Summarizing chapter {}/{}", i + 1, chapters.len());
            let summary = self.generator
                .generate(&self.prompts.chapter_summary, chapter.summary_context())
                .await?;
            summaries.push(summary);
        }
        Ok(summaries)
    }

    async fn generate_overall_summary(&self, content: &str) -> Result<String, AppError> {
        debug!("Summarizing transcript");
        let summary = self.generator
            .generate(&self.prompts.overall_summary, truncate_chars(content, SUMMARY_CONTEXT_CHARS))
            .await?;
        Ok(summary)
    }

    async fn generate_titles(&self, chapters: &[Chapter]) -> Result<Vec<String>, AppError> {
        let mut titles = Vec::with_capacity(chapters.len());
        for (i, chapter) in chapters.iter().enumerate() {
            debug!("Titling chapter {}/{}", i + 1, chapters.len());
            let title = self.generator
                .generate(&self.prompts.chapter_title, chapter.title_context())
                .await?;
            titles.push(title.trim().to_string());
        }
        Ok(titles)
    }
}
