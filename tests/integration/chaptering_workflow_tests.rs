/*!
 * End-to-end chaptering tests: parse, segment and generate
 */

use anyhow::Result;
use chappie::app_config::PromptConfig;
use chappie::chapter_processor::{ChapterProcessor, ChapterReport};
use chappie::chapters::{SUMMARY_CONTEXT_CHARS, TITLE_CONTEXT_CHARS};
use chappie::errors::{AppError, ProviderError, SubtitleError};
use chappie::providers::mock::MockGenerator;
use crate::common;

/// Test a full run over a 25-entry transcript
#[tokio::test]
async fn test_process_srt_withTwentyFiveEntries_shouldBuildFullReport() {
    common::init_test_logging();
    let generator = MockGenerator::working()
        .with_custom_response(|template, text| format!("{} :: {}", template.len(), text.len()));
    let processor = ChapterProcessor::new(generator.clone());

    let report = processor.process_srt(&common::sample_srt(25)).await.unwrap();

    assert_eq!(report.chapters.len(), 3);
    assert_eq!(report.chapter_summaries.len(), 3);
    assert_eq!(generator.request_count(), 3 + 1 + 3);
    assert_eq!(report.chapters[0].start, 0.0);
    assert_eq!(report.chapters[0].end, 19.5);
    assert_eq!(report.chapters[1].start, 20.0);
    assert_eq!(report.chapters[2].end, 49.5);
    assert!(report.chapters.iter().all(|c| !c.title.starts_with("Chapter ")));
}

/// Test that the generator receives truncated chapter text and raw transcript
#[tokio::test]
async fn test_process_srt_withLongText_shouldSendTruncatedContext() {
    let long_line = "word ".repeat(1200);
    let content = format!("1\n00:00:00,000 --> 00:00:05,000\n{}\n", long_line);
    let generator = MockGenerator::working();
    let processor = ChapterProcessor::new(generator.clone());

    processor.process_srt(&content).await.unwrap();

    let calls = generator.calls();
    let prompts = PromptConfig::default();
    let summary_call = calls.iter().find(|c| c.prompt_template == prompts.chapter_summary).unwrap();
    let title_call = calls.iter().find(|c| c.prompt_template == prompts.chapter_title).unwrap();
    let overall_call = calls.iter().find(|c| c.prompt_template == prompts.overall_summary).unwrap();

    assert_eq!(summary_call.text.chars().count(), SUMMARY_CONTEXT_CHARS);
    assert_eq!(title_call.text.chars().count(), TITLE_CONTEXT_CHARS);
    assert!(overall_call.text.starts_with("1\n00:00:00,000 --> 00:00:05,000\n"));
    assert_eq!(overall_call.text.chars().count(), SUMMARY_CONTEXT_CHARS);
}

/// Test that titles replace placeholders in chapter order
#[tokio::test]
async fn test_process_srt_shouldAssignTitlesInOrder() {
    let generator = MockGenerator::working().with_custom_response(|template, text| {
        if template.contains("title") {
            format!("\n Title for {} \n", text.split(' ').take(2).collect::<Vec<_>>().join(" "))
        } else {
            "summary".to_string()
        }
    });
    let processor = ChapterProcessor::new(generator);

    let report = processor.process_srt(&common::sample_srt(21)).await.unwrap();

    let titles: Vec<&str> = report.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Title for Line 1", "Title for Line 11", "Title for Line 21"]);
    assert_eq!(report.table_of_contents()[1], "Chapter 2: Title for Line 11 (00:00:20 - 00:00:39)");
}

/// Test custom prompt templates are used as-is
#[tokio::test]
async fn test_process_srt_withCustomPrompts_shouldUseThem() {
    let generator = MockGenerator::working();
    let prompts = PromptConfig {
        chapter_summary: "S: {content}".to_string(),
        chapter_title: "T: {content}".to_string(),
        overall_summary: "O: {content}".to_string(),
    };
    let processor = ChapterProcessor::new(generator).with_prompts(prompts);

    let report = processor.process_srt(&common::sample_srt(2)).await.unwrap();

    assert_eq!(report.chapter_summaries[0], "[GENERATED] S: Line 1 Line 2");
    assert_eq!(report.chapters[0].title, "[GENERATED] T: Line 1 Line 2");
    assert!(report.overall_summary.starts_with("[GENERATED] O: 1\n"));
}

/// Test that a provider failure stops the pipeline
#[tokio::test]
async fn test_process_srt_withFailingGenerator_shouldStopAtFirstError() {
    let generator = MockGenerator::failing();
    let processor = ChapterProcessor::new(generator.clone());

    let result = processor.process_srt(&common::sample_srt(30)).await;

    assert!(matches!(result, Err(AppError::Provider(ProviderError::ApiError { status_code: 500, .. }))));
    assert_eq!(generator.request_count(), 1);
}

/// Test that a bad timecode fails before any generation
#[tokio::test]
async fn test_process_srt_withBadTimecode_shouldNotCallGenerator() {
    let generator = MockGenerator::working();
    let processor = ChapterProcessor::new(generator.clone());

    let result = processor.process_srt("1\nnope --> 00:00:01,000\nHi\n").await;

    assert!(matches!(result, Err(AppError::Subtitle(SubtitleError::Timecode(_)))));
    assert_eq!(generator.request_count(), 0);
}

/// Test directory mode only picks SRT files and keys by file name
#[tokio::test]
async fn test_process_directory_shouldProcessEachSrtFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "b.srt", 12)?;
    common::create_test_subtitle(temp_dir.path(), "a.srt", 3)?;
    common::create_test_file(temp_dir.path(), "notes.txt", "1\n00:00:00,000 --> 00:00:01,000\nignored\n")?;
    let generator = MockGenerator::working();
    let processor = ChapterProcessor::new(generator.clone());

    let results = processor.process_directory(temp_dir.path()).await?;

    let names: Vec<&String> = results.keys().collect();
    assert_eq!(names, vec!["a.srt", "b.srt"]);
    assert_eq!(results["a.srt"].chapters.len(), 1);
    assert_eq!(results["b.srt"].chapters.len(), 2);
    assert_eq!(generator.request_count(), (1 + 1 + 1) + (2 + 1 + 2));
    Ok(())
}

/// Test the JSON report shape
#[tokio::test]
async fn test_report_to_json_shouldRoundTrip() {
    let processor = ChapterProcessor::new(MockGenerator::working());
    let report = processor.process_srt(&common::sample_srt(4)).await.unwrap();

    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let parsed: ChapterReport = serde_json::from_str(&json).unwrap();

    assert_eq!(value["chapters"][0]["start"], 0.0);
    assert!(value["overall_summary"].is_string());
    assert_eq!(parsed, report);
}
