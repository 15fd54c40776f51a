//! Custom error types for exam booklet processing

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error kinds raised while cropping pages or building answer keys
#[derive(Debug)]
pub enum ExamError {
    /// I/O error
    IoError(io::Error),
    /// Normalized rectangle is out of range or inverted
    InvalidRegion(String),
    /// Pixel bounds collapsed to zero width or height
    EmptyRegion {
        width: u32,
        height: u32,
        region: String,
    },
    /// Page index beyond the document length
    MissingPage {
        document: PathBuf,
        page: u16,
        page_count: u16,
    },
    /// Document path not found
    MissingFile(PathBuf),
    /// Output file or directory could not be written
    WriteFailure {
        path: PathBuf,
        reason: String,
    },
    /// PDF library could not be bound or the page could not be rendered
    Render(String),
    /// Malformed crop plan or answer-key table
    Config(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ExamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamError::IoError(e) => write!(f, "I/O error: {}", e),
            ExamError::InvalidRegion(msg) => write!(f, "Invalid region: {}", msg),
            ExamError::EmptyRegion { width, height, region } => {
                write!(f, "Empty region: {} collapses to nothing on a {}x{} page", region, width, height)
            }
            ExamError::MissingPage { document, page, page_count } => write!(
                f,
                "Missing page: index {} requested but {} has {} pages",
                page,
                document.display(),
                page_count
            ),
            ExamError::MissingFile(path) => write!(f, "Missing file: {}", path.display()),
            ExamError::WriteFailure { path, reason } => {
                write!(f, "Write failure for {}: {}", path.display(), reason)
            }
            ExamError::Render(msg) => write!(f, "Render error: {}", msg),
            ExamError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ExamError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ExamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExamError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ExamError {
    fn from(error: io::Error) -> Self {
        ExamError::IoError(error)
    }
}

impl From<String> for ExamError {
    fn from(msg: String) -> Self {
        ExamError::GenericError(msg)
    }
}

impl From<toml::de::Error> for ExamError {
    fn from(error: toml::de::Error) -> Self {
        ExamError::Config(format!("Failed to parse TOML: {}", error))
    }
}

/// Result type for examkit operations
pub type ExamResult<T> = Result<T, ExamError>;
