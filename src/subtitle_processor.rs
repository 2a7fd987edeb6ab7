use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{SubtitleError, TimecodeError};
use crate::timecode;

// @module: SRT transcript parsing

// @const: Separator between start and end on a timecode line
const TIMECODE_SEPARATOR: &str = " --> ";

// @const: UTF-8 byte order mark some editors prepend
const BYTE_ORDER_MARK: char = '\u{feff}';

// @struct: Single timed subtitle entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubtitleEntry {
    // @field: Start time in seconds, absent when the block had no timecode line
    pub start: Option<f64>,

    // @field: End time in seconds, absent when the block had no timecode line
    pub end: Option<f64>,

    // @field: Subtitle text, lines joined with a single space
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a fully populated entry
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        SubtitleEntry {
            start: Some(start),
            end: Some(end),
            text: text.into(),
        }
    }

    /// True when nothing has been collected for this entry yet
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.text.is_empty()
    }

    /// True when the entry has both times and some text
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some() && !self.text.is_empty()
    }

    // @appends: Trimmed text line, space separated
    fn push_text(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(line);
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let format_bound = |bound: Option<f64>| {
            bound.map_or_else(|| "--:--:--".to_string(), timecode::format_timestamp)
        };
        write!(f, "[{} - {}] {}", format_bound(self.start), format_bound(self.end), self.text)
    }
}

/// Collection of subtitle entries read from one transcript
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// Entries in source order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create a new, empty subtitle collection
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            entries: Vec::new(),
        }
    }

    /// Read and parse an SRT file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let path = path.as_ref();
        let entries = Self::parse_srt_file(path)?;

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            entries,
        })
    }

    /// Number of entries missing a timecode or text
    pub fn incomplete_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.is_complete()).count()
    }

    /// Parse SRT file content to subtitle entries
    pub fn parse_srt_file<P: AsRef<Path>>(path: P) -> Result<Vec<SubtitleEntry>, SubtitleError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SubtitleError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::parse_srt_string(&content)?)
    }

    /// Parse SRT format string into subtitle entries
    ///
    /// Blocks are delimited by index lines (lines made only of digits), not by
    /// blank lines, so transcripts with missing or extra blank lines still parse.
    /// Anything before the first index line is skipped. A malformed timecode
    /// aborts the whole parse; a malformed block never does, and blocks without
    /// a timecode or without text are kept as partially populated entries.
    pub fn parse_srt_string(content: &str) -> Result<Vec<SubtitleEntry>, TimecodeError> {
        let content = content.strip_prefix(BYTE_ORDER_MARK).unwrap_or(content);
        let lines: Vec<&str> = content.lines().collect();

        let Some(first_index) = lines.iter().position(|line| Self::is_index_line(line)) else {
            debug!("No subtitle index line found, transcript is empty");
            return Ok(Vec::new());
        };

        if first_index > 0 {
            debug!("Skipping {} line(s) of leading metadata", first_index);
        }

        let mut entries = Vec::new();
        let mut current = SubtitleEntry::default();

        for line in &lines[first_index..] {
            let trimmed = line.trim();

            if Self::is_index_line(trimmed) {
                if !current.is_empty() {
                    entries.push(std::mem::take(&mut current));
                }
            } else if let Some((start, end)) = line.split_once(TIMECODE_SEPARATOR) {
                current.start = Some(timecode::parse_timestamp(start.trim())?);
                current.end = Some(timecode::parse_timestamp(end.trim())?);
            } else if !trimmed.is_empty() {
                current.push_text(trimmed);
            }
        }

        // Add the last entry if there is one
        if !current.is_empty() {
            entries.push(current);
        }

        let incomplete = entries.iter().filter(|entry| !entry.is_complete()).count();
        if incomplete > 0 {
            debug!("Parsed {} entries, {} of them incomplete", entries.len(), incomplete);
        } else {
            debug!("Parsed {} entries", entries.len());
        }

        Ok(entries)
    }

    // @checks: Line is a non-empty run of ASCII digits
    fn is_index_line(line: &str) -> bool {
        let trimmed = line.trim();
        !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Entries: {}", self.entries.len())?;
        Ok(())
    }
}
