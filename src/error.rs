use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SunpkgError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error("Parsing error in '{file}': {message}")]
    ParseError { file: String, message: String },

    #[error("KDL parse error: {0}")]
    KdlError(#[from] kdl::KdlError),

    #[error("Invalid package name '{name}': {reason}")]
    InvalidPackageName { name: String, reason: String },

    /// The native query reported an error other than "package not found"
    #[error("Unable to get information about package {package} because of: {message}")]
    QueryFailed { package: String, message: String },

    /// Uninstall succeeded but the following install did not
    #[error(
        "Update of package {package} removed the installed version but the reinstall failed: {reason}. \
         Query the package again to learn its current state"
    )]
    PartialUpdate { package: String, reason: String },

    #[error("Package {package} version {wanted} is not available from source (source provides {available})")]
    VersionUnavailable {
        package: String,
        wanted: String,
        available: String,
    },

    #[error("Operation interrupted by user")]
    Interrupted,

    #[error("System dependency missing: {0}")]
    DependencyMissing(String),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    YamlError(#[from] serde_yml::Error),

    #[error("Manifest not found at: {path}")]
    ManifestNotFound { path: PathBuf },

    #[error("System command '{command}' failed: {reason}")]
    SystemCommandFailed { command: String, reason: String },

    /// Invalid regex pattern
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),

    /// Path resolution or validation error
    #[error("Path error: {0}")]
    PathError(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SunpkgError>;
