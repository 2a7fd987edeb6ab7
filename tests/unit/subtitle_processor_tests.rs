/*!
 * Tests for subtitle processing functionality
 */

use anyhow::Result;
use chappie::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use chappie::errors::SubtitleError;
use crate::common;

/// Test the reference two-block document
#[test]
fn test_parse_srt_string_withReferenceSample_shouldReturnBothEntries() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n2\n00:00:02,000 --> 00:00:03,000\nWorld\n";

    let entries = SubtitleCollection::parse_srt_string(content).unwrap();

    assert_eq!(entries, vec![
        SubtitleEntry::new(1.0, 2.0, "Hello"),
        SubtitleEntry::new(2.0, 3.0, "World"),
    ]);
}

/// Test reading a generated file from disk
#[test]
fn test_from_file_withGeneratedSubtitle_shouldParseAllEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "talk.srt", 12)?;

    let collection = SubtitleCollection::from_file(&path)?;

    assert_eq!(collection.source_file, path);
    assert_eq!(collection.entries.len(), 12);
    assert_eq!(collection.incomplete_count(), 0);
    assert_eq!(collection.entries[11].text, "Line 12");
    assert_eq!(collection.entries[11].start, Some(22.0));
    assert_eq!(collection.entries[11].end, Some(23.5));
    Ok(())
}

/// Test that a missing file is reported with its path
#[test]
fn test_parse_srt_file_withMissingFile_shouldReportPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.srt");

    let error = SubtitleCollection::parse_srt_file(&missing).unwrap_err();

    match error {
        SubtitleError::Read { path, .. } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

/// Test that a bad timecode in a file aborts parsing
#[test]
fn test_parse_srt_file_withBadTimecode_shouldReturnTimecodeError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "broken.srt",
        "1\n00:00:01,000 --> 00:00:02,000\nFine\n\n2\n00:xx:02,000 --> 00:00:03,000\nBroken\n",
    )?;

    let error = SubtitleCollection::parse_srt_file(&path).unwrap_err();

    assert!(matches!(error, SubtitleError::Timecode(_)));
    Ok(())
}

/// Test incomplete entries are counted but kept
#[test]
fn test_incomplete_count_withPartialBlocks_shouldCountThem() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "partial.srt",
        "1\nText without timing\n\n2\n00:00:02,000 --> 00:00:03,000\n\n3\n00:00:04,000 --> 00:00:05,000\nComplete\n",
    )?;

    let collection = SubtitleCollection::from_file(&path)?;

    assert_eq!(collection.entries.len(), 3);
    assert_eq!(collection.incomplete_count(), 2);
    assert_eq!(collection.entries[0].start, None);
    assert_eq!(collection.entries[1].text, "");
    Ok(())
}

/// Test entry helpers and display
#[test]
fn test_subtitle_entry_helpers_shouldReflectFields() {
    let entry = SubtitleEntry::new(61.0, 65.5, "Hello world");

    assert!(entry.is_complete());
    assert_eq!(entry.to_string(), "[00:01:01 - 00:01:05] Hello world");

    let partial = SubtitleEntry { start: None, end: None, text: "Only text".to_string() };
    assert!(!partial.is_complete());
    assert_eq!(partial.to_string(), "[--:--:-- - --:--:--] Only text");
}
