/*!
 * Error types for the chappie application.
 *
 * Each stage of the pipeline has its own error enum, defined with the
 * thiserror crate. `AppError` wraps them at the application boundary.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while decoding an SRT clock string
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimecodeError {
    /// The string does not have two or three colon-separated fields
    #[error("Unexpected time format: {0}")]
    InvalidFormat(String),

    /// One of the fields is not a non-negative number
    #[error("Invalid {field} in timestamp: {input}")]
    InvalidField {
        /// The full timestamp that failed to parse
        input: String,
        /// Name of the offending field (hours, minutes or seconds)
        field: &'static str,
    },
}

impl TimecodeError {
    /// The timestamp string that could not be decoded
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidFormat(input) => input,
            Self::InvalidField { input, .. } => input,
        }
    }
}

/// Errors that can occur while reading subtitle files
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timecode line could not be decoded
    #[error("Invalid timecode: {0}")]
    Timecode(#[from] TimecodeError),

    /// The subtitle file could not be read
    #[error("Failed to read subtitle file {path:?}: {source}")]
    Read {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by the chapter segmenter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChapterError {
    /// The transcript contained no subtitle entries
    #[error("Cannot build chapters from an empty transcript")]
    EmptyInput,
}

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from chapter segmentation
    #[error("Chapter error: {0}")]
    Chapter(#[from] ChapterError),

    /// Error from a text generation provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<TimecodeError> for AppError {
    fn from(error: TimecodeError) -> Self {
        Self::Subtitle(SubtitleError::Timecode(error))
    }
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
