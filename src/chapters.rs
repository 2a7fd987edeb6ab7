/*!
 * Chapter segmentation.
 *
 * Groups the parsed subtitle entries into fixed-size, contiguous chapters.
 * Every entry belongs to exactly one chapter; a transcript of N entries
 * yields ceil(N / CHAPTER_SIZE) chapters.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::ChapterError;
use crate::subtitle_processor::SubtitleEntry;
use crate::timecode;

/// Number of subtitle entries per chapter
pub const CHAPTER_SIZE: usize = 10;

/// Characters of chapter text sent when asking for a title
pub const TITLE_CONTEXT_CHARS: usize = 1000;

/// Characters of chapter text (or transcript) sent when asking for a summary
pub const SUMMARY_CONTEXT_CHARS: usize = 4000;

/// A contiguous run of subtitle entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    /// Start of the first entry, in seconds
    pub start: f64,
    /// End of the last entry, in seconds
    pub end: f64,
    /// Entry texts joined with single spaces
    pub text: String,
    /// Placeholder until a generated title replaces it
    pub title: String,
}

impl Chapter {
    /// Default title for the chapter at 1-based position `number`
    pub fn placeholder_title(number: usize) -> String {
        format!("Chapter {}", number)
    }

    /// Replace the title, keeping everything else
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replace the title in place
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// `HH:MM:SS - HH:MM:SS`
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            timecode::format_timestamp(self.start),
            timecode::format_timestamp(self.end)
        )
    }

    /// Leading part of the text used to generate a title
    pub fn title_context(&self) -> &str {
        truncate_chars(&self.text, TITLE_CONTEXT_CHARS)
    }

    /// Leading part of the text used to generate a summary
    pub fn summary_context(&self) -> &str {
        truncate_chars(&self.text, SUMMARY_CONTEXT_CHARS)
    }
}

/// First `max_chars` characters of `text` (not bytes)
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

/// Split entries into chapters of `CHAPTER_SIZE` entries
///
/// A chapter closes when the walk reaches entry 10, 20, ...; that boundary
/// entry opens the next chapter, so the closing chapter ends at the previous
/// entry's end. The last chapter always ends at the last entry's end and may
/// hold fewer than `CHAPTER_SIZE` entries. Entries without a timecode count as
/// starting/ending at 0.0 and entries without text add nothing to the text.
pub fn segment(entries: &[SubtitleEntry]) -> Result<Vec<Chapter>, ChapterError> {
    let first = entries.first().ok_or(ChapterError::EmptyInput)?;

    let mut chapters = Vec::with_capacity(entries.len().div_ceil(CHAPTER_SIZE));
    let mut chapter_start = first.start.unwrap_or_default();
    let mut chapter_text = String::new();

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 && i % CHAPTER_SIZE == 0 {
            let chapter_end = entries[i - 1].end.unwrap_or_default();
            chapters.push(close_chapter(chapter_start, chapter_end, &chapter_text, chapters.len() + 1));

            chapter_start = entry.start.unwrap_or_default();
            chapter_text.clear();
        }

        if !entry.text.is_empty() {
            if !chapter_text.is_empty() {
                chapter_text.push(' ');
            }
            chapter_text.push_str(&entry.text);
        }
    }

    let last_end = entries[entries.len() - 1].end.unwrap_or_default();
    chapters.push(close_chapter(chapter_start, last_end, &chapter_text, chapters.len() + 1));

    debug!("Segmented {} entries into {} chapters", entries.len(), chapters.len());

    Ok(chapters)
}

fn close_chapter(start: f64, end: f64, text: &str, number: usize) -> Chapter {
    Chapter {
        start,
        end,
        text: text.trim().to_string(),
        title: Chapter::placeholder_title(number),
    }
}
