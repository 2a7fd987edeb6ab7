/*!
 * Common test utilities for the chappie test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// SRT content with `count` entries, two seconds apart, each lasting 1.5s
///
/// Entry `i` (1-based) reads `Line i`.
pub fn sample_srt(count: usize) -> String {
    (1..=count)
        .map(|i| {
            let start = (i - 1) * 2;
            format!(
                "{}\n{} --> {}\nLine {}\n",
                i,
                srt_clock(start as f64),
                srt_clock(start as f64 + 1.5),
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format seconds as an SRT clock string `HH:MM:SS,mmm`
pub fn srt_clock(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    format!(
        "{:02}:{:02}:{:02},{:03}",
        total_ms / 3_600_000,
        (total_ms % 3_600_000) / 60_000,
        (total_ms % 60_000) / 1000,
        total_ms % 1000
    )
}

/// Creates a sample subtitle file with `count` entries
pub fn create_test_subtitle(dir: &Path, filename: &str, count: usize) -> Result<PathBuf> {
    create_test_file(dir, filename, &sample_srt(count))
}

/// Initializes test logging once; later calls are no-ops
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
