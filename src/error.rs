use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Project validation failed: {0}")]
    ProjectValidation(String),

    #[error("Invalid version: {0}")]
    VersionFormat(String),

    #[error("Git operation failed: {0}")]
    GitOperation(String),

    #[error("Packaging command failed: {0}")]
    Packaging(String),

    #[error("Manifest update failed: {0}")]
    ManifestUpdate(String),

    #[error("Changelog update failed: {0}")]
    ChangelogUpdate(String),

    #[error("Descriptor update failed: {0}")]
    DescriptorUpdate(String),

    #[error("Cancelled by user")]
    UserCancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReleaseError>;
