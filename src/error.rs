use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    /// Required upload field missing; the only client error
    #[error("{0}")]
    MissingInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Detector failed: {0}")]
    Detector(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Folder not found: {0}")]
    FolderNotFound(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] inventario_common::Error),
}

impl InventoryError {
    /// HTTP status for the error payload
    pub fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::MissingInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;
