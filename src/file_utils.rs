use anyhow::{Result, Context};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Suffix appended to an audio file stem to find its transcripts
pub const TRANSCRIPT_SUFFIX: &str = "_transcript";

// @const: Extension of generated chapter reports
pub const REPORT_EXTENSION: &str = "chapters.json";

// @const: Audio extensions accepted as input
const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "m4a", "flac", "ogg", "aac"];

// @struct: Companion files found next to an audio file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStatus {
    // @field: The audio file itself
    pub audio: Option<PathBuf>,
    // @field: Plain text transcript
    pub transcript_txt: Option<PathBuf>,
    // @field: SRT transcript
    pub srt: Option<PathBuf>,
}

impl FileStatus {
    // @returns: Whether the transcript needed for chaptering is present
    pub fn is_ready(&self) -> bool {
        self.srt.is_some()
    }
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @checks: Extension matches, ignoring case and a leading dot
    pub fn has_extension<P: AsRef<Path>>(path: P, extension: &str) -> bool {
        let wanted = extension.trim_start_matches('.');
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(wanted))
            .unwrap_or(false)
    }

    // @checks: Known audio extension
    pub fn is_audio_file<P: AsRef<Path>>(path: P) -> bool {
        AUDIO_EXTENSIONS.iter().any(|ext| Self::has_extension(&path, ext))
    }

    /// Find files with a specific extension directly inside a directory,
    /// sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::has_extension(path, extension) {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir(parent)?;
            }
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    // @returns: `<dir>/<stem>_transcript.<extension>` for an audio file
    fn companion_path(audio: &Path, extension: &str) -> PathBuf {
        let stem = audio.file_stem().unwrap_or_default().to_string_lossy();
        audio.with_file_name(format!("{}{}.{}", stem, TRANSCRIPT_SUFFIX, extension))
    }

    /// SRT transcript next to an audio file, if one exists
    pub fn transcript_for_audio<P: AsRef<Path>>(audio: P) -> Option<PathBuf> {
        let srt = Self::companion_path(audio.as_ref(), "srt");
        Self::file_exists(&srt).then_some(srt)
    }

    /// Report which companion files exist for an audio file
    pub fn file_status<P: AsRef<Path>>(audio: P) -> FileStatus {
        let audio = audio.as_ref();
        let txt = Self::companion_path(audio, "txt");

        FileStatus {
            audio: (Self::file_exists(audio) && Self::is_audio_file(audio)).then(|| audio.to_path_buf()),
            transcript_txt: Self::file_exists(&txt).then_some(txt),
            srt: Self::transcript_for_audio(audio),
        }
    }

    // @generates: Output path for a chapter report beside the input
    pub fn report_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
        input_file.with_file_name(format!("{}.{}", stem, REPORT_EXTENSION))
    }
}
