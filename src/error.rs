// src/error.rs
//! Error types for the annotation converter

use std::fmt;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug)]
pub enum ConvertError {
    InputNotFound { path: PathBuf, source: std::io::Error },
    InputUnreadable { path: PathBuf, source: std::io::Error },
    OutputUnwritable { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    Pattern(regex::Error),
    Config(String),
}

impl ConvertError {
    /// Classify a failure to open or read the input log
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            ConvertError::InputNotFound { path, source }
        } else {
            ConvertError::InputUnreadable { path, source }
        }
    }

    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::OutputUnwritable {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::InputNotFound { path, source } => {
                write!(f, "Input file not found: {} ({})", path.display(), source)
            }
            ConvertError::InputUnreadable { path, source } => {
                write!(f, "Cannot read input file {}: {}", path.display(), source)
            }
            ConvertError::OutputUnwritable { path, source } => {
                write!(f, "Cannot write output file {}: {}", path.display(), source)
            }
            ConvertError::Json(e) => write!(f, "JSON error: {}", e),
            ConvertError::Pattern(e) => write!(f, "Sentence pattern error: {}", e),
            ConvertError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::InputNotFound { source, .. }
            | ConvertError::InputUnreadable { source, .. }
            | ConvertError::OutputUnwritable { source, .. } => Some(source),
            ConvertError::Json(e) => Some(e),
            ConvertError::Pattern(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(error: serde_json::Error) -> Self {
        ConvertError::Json(error)
    }
}

impl From<regex::Error> for ConvertError {
    fn from(error: regex::Error) -> Self {
        ConvertError::Pattern(error)
    }
}
