use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScribePrepError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid command-line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Configuration validation failed: {details}")]
    ConfigValidation { details: String },

    #[error("Failed to spawn package manager '{command}': {reason}")]
    InstallerSpawn { command: String, reason: String },

    #[error("Package installation failed for group '{group}' (exit status {status})")]
    PackageInstall { group: String, status: i32 },

    #[error("Failed to download artifact {filename} from {url}: {reason}")]
    ArtifactDownload {
        filename: String,
        url: String,
        reason: String,
    },

    #[error("Artifact verification failed for {path}: {source}")]
    ArtifactVerification {
        path: PathBuf,
        #[source]
        source: crate::verification::VerificationError,
    },

    #[error("Invalid artifact digest '{digest}': {reason}")]
    InvalidDigest { digest: String, reason: String },

    #[error("Target directory creation failed at {path}: {reason}")]
    DirectoryCreation { path: PathBuf, reason: String },

    #[error("Application factory failed: {reason}")]
    AppFactory { reason: String },

    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
