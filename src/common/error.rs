//! Error types for qa-catalog
//!
//! Messages name the file or setting involved so a failed run can be fixed
//! without reading the source.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qa-catalog
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Unknown role '{0}'. Expected one of: admin, docente, community_manager, equipo_directivo, lider_generacion, consultor, supervisor_de_red, lider_comunidad")]
    UnknownRole(String),

    #[error("No seed files given. Pass files on the command line or set 'seeds.files' in the config")]
    NoSeedFiles,

    // === Pattern Errors ===
    #[error("Invalid pattern '{name}': {error}")]
    Pattern { name: String, error: String },

    // === Environment Errors ===
    #[error("Environment file not found at {0}")]
    EnvFileMissing(String),

    #[error("Failed to parse environment file '{path}': {error}")]
    EnvFileParse { path: String, error: String },

    #[error("Missing Supabase credentials in {0} (need NEXT_PUBLIC_SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY)")]
    MissingCredentials(String),

    // === Network Errors ===
    #[error("Failed to fetch scenarios: HTTP {status}\n{body}")]
    FetchFailed { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // === Output Errors ===
    #[error("Failed to write file '{path}': {error}")]
    FileWrite { path: String, error: String },

    #[error("Document archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file read error for a path
    pub fn file_read(path: &std::path::Path, error: impl ToString) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a file write error for a path
    pub fn file_write(path: &std::path::Path, error: impl ToString) -> Self {
        Self::FileWrite {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a pattern compilation error
    pub fn pattern(name: &str, error: regex::Error) -> Self {
        Self::Pattern {
            name: name.to_string(),
            error: error.to_string(),
        }
    }
}
