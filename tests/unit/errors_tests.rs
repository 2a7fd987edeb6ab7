/*!
 * Tests for error types
 */

use std::path::PathBuf;
use chappie::errors::{AppError, ChapterError, ProviderError, SubtitleError, TimecodeError};

/// Test error messages name the failing piece
#[test]
fn test_error_display_shouldDescribeFailure() {
    let timecode = TimecodeError::InvalidFormat("12".to_string());
    assert_eq!(timecode.to_string(), "Unexpected time format: 12");

    let chapter = ChapterError::EmptyInput;
    assert!(chapter.to_string().contains("empty"));

    let provider = ProviderError::ApiError { status_code: 503, message: "busy".to_string() };
    assert_eq!(provider.to_string(), "API responded with error: 503 - busy");
}

/// Test conversions into the application error
#[test]
fn test_appError_conversions_shouldPickMatchingVariant() {
    let from_chapter: AppError = ChapterError::EmptyInput.into();
    assert!(matches!(from_chapter, AppError::Chapter(ChapterError::EmptyInput)));

    let from_provider: AppError = ProviderError::RateLimitExceeded("slow down".to_string()).into();
    assert!(matches!(from_provider, AppError::Provider(ProviderError::RateLimitExceeded(_))));

    let from_io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(matches!(from_io, AppError::File(_)));

    let from_anyhow: AppError = anyhow::anyhow!("odd").into();
    assert!(matches!(from_anyhow, AppError::Unknown(_)));
}

/// Test the read error keeps its source
#[test]
fn test_subtitleError_read_shouldExposeSource() {
    use std::error::Error;

    let error = SubtitleError::Read {
        path: PathBuf::from("talk.srt"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };

    assert!(error.to_string().contains("talk.srt"));
    assert!(error.source().is_some());
}
