use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jobdocs operations
#[derive(Error, Debug)]
pub enum JobdocsError {
    /// IO error when reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// File not found error with specific path
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Upload with an extension we cannot read text from
    #[error("Unsupported file format: {extension} (supported formats: .docx, .txt, .md)")]
    UnsupportedFormat { extension: String },

    /// The file is not a readable Word archive
    #[error("{path} is not a valid .docx file: {reason}")]
    InvalidDocx { path: PathBuf, reason: String },

    /// The archive opened but has no main document part
    #[error("{path} does not contain expected Word document structure")]
    MissingDocumentPart { path: PathBuf },

    /// Packing the generated document failed
    #[error("Failed to write document {path}: {reason}")]
    DocxWrite { path: PathBuf, reason: String },

    /// Required input is absent from both the application file and the active config
    #[error("Missing {what}: provide it in the application file or configure it first")]
    MissingData { what: &'static str },

    /// No config.yaml is active
    #[error("No active configuration (run `jobdocs import` or `jobdocs profile switch <name>`)")]
    NoActiveConfig,

    /// Named profile does not exist
    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    /// Named profile already exists and overwrite was not requested
    #[error("Profile '{name}' already exists")]
    ProfileExists { name: String },

    /// Refusing to remove the profile the active config matches
    #[error("Cannot delete active profile '{name}'; switch to a different profile first")]
    ActiveProfile { name: String },

    /// Profile names become file names, so they are restricted
    #[error("Invalid profile name: '{name}'")]
    InvalidProfileName { name: String },

    /// Platform configuration directory could not be determined
    #[error("Could not determine a configuration directory; pass --home or set JOBDOCS_HOME")]
    NoHomeDir,

    /// Regex compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Glob pattern compilation error
    #[error("Glob error: {0}")]
    Glob(#[from] globset::Error),

    /// `WalkDir` error when scanning the profiles directory
    #[error("Directory traversal error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, JobdocsError>;
