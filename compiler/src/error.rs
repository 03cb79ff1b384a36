use std::path::PathBuf;
use thiserror::Error;

use crate::utils::quote;

#[derive(Debug, Error)]
pub enum CrudError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Column type {} is not available", quote(.0))]
    InvalidColumnType(String),

    #[error("Unsupported migration action {0}")]
    UnsupportedMigrationAction(String),

    #[error("Stub not found: {0}")]
    StubNotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid name {}", quote(.0))]
    InvalidName(String),

    #[error("A non-empty schema is required")]
    MissingSchema,

    #[error("File already exists: {}", .0.display())]
    FileExists(PathBuf),
}
