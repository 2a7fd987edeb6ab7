/*!
 * Tests for chapter segmentation
 */

use chappie::chapters::{segment, truncate_chars, Chapter, CHAPTER_SIZE, SUMMARY_CONTEXT_CHARS, TITLE_CONTEXT_CHARS};
use chappie::errors::ChapterError;
use chappie::subtitle_processor::{SubtitleCollection, SubtitleEntry};
use crate::common;

/// Test segmentation of a parsed transcript
#[test]
fn test_segment_withParsedTranscript_shouldMatchEntryBounds() {
    let entries = SubtitleCollection::parse_srt_string(&common::sample_srt(23)).unwrap();

    let chapters = segment(&entries).unwrap();

    assert_eq!(chapters.len(), 3);
    for (n, chapter) in chapters.iter().enumerate() {
        let first = &entries[n * CHAPTER_SIZE];
        let last = &entries[((n + 1) * CHAPTER_SIZE).min(entries.len()) - 1];
        assert_eq!(chapter.start, first.start.unwrap());
        assert_eq!(chapter.end, last.end.unwrap());
        assert_eq!(chapter.title, format!("Chapter {}", n + 1));
    }
    assert_eq!(chapters[2].text, "Line 21 Line 22 Line 23");
}

/// Test that every entry's text lands in exactly one chapter, in order
#[test]
fn test_segment_shouldCoverEveryEntryOnce() {
    let entries = SubtitleCollection::parse_srt_string(&common::sample_srt(37)).unwrap();

    let chapters = segment(&entries).unwrap();
    let joined = chapters.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join(" ");
    let expected = entries.iter().map(|e| e.text.as_str()).collect::<Vec<_>>().join(" ");

    assert_eq!(joined, expected);
    assert_eq!(chapters.len(), 4);
}

/// Test the empty input error
#[test]
fn test_segment_withEmptyInput_shouldFail() {
    assert_eq!(segment(&[]), Err(ChapterError::EmptyInput));
}

/// Test missing times fall back to zero and empty text adds nothing
#[test]
fn test_segment_withPartialEntries_shouldUseZeroAndSkipEmptyText() {
    let entries = vec![
        SubtitleEntry { start: None, end: None, text: "first".to_string() },
        SubtitleEntry { start: Some(2.0), end: Some(3.0), text: String::new() },
        SubtitleEntry { start: Some(4.0), end: None, text: "last".to_string() },
    ];

    let chapters = segment(&entries).unwrap();

    assert_eq!(chapters.len(), 1);
    assert_eq!(chapters[0].start, 0.0);
    assert_eq!(chapters[0].end, 0.0);
    assert_eq!(chapters[0].text, "first last");
}

/// Test chapter title helpers
#[test]
fn test_chapter_with_title_shouldReplacePlaceholder() {
    let chapters = segment(&[SubtitleEntry::new(0.0, 61.0, "hello")]).unwrap();

    let chapter = chapters[0].clone().with_title("Greetings");

    assert_eq!(chapters[0].title, Chapter::placeholder_title(1));
    assert_eq!(chapter.title, "Greetings");
    assert_eq!(chapter.time_range(), "00:00:00 - 00:01:01");
}

/// Test the context windows count characters, not bytes
#[test]
fn test_context_windows_shouldTruncateByCharacters() {
    let text = "é".repeat(SUMMARY_CONTEXT_CHARS + 10);
    let chapter = Chapter {
        start: 0.0,
        end: 1.0,
        text: text.clone(),
        title: Chapter::placeholder_title(1),
    };

    assert_eq!(chapter.title_context().chars().count(), TITLE_CONTEXT_CHARS);
    assert_eq!(chapter.summary_context().chars().count(), SUMMARY_CONTEXT_CHARS);
    assert_eq!(truncate_chars("short", 1000), "short");
    assert_eq!(truncate_chars("abc", 0), "");
}
