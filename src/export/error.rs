use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: the dataset is empty")]
    EmptyDataset,

    #[error("Failed to create export file '{0}'")]
    FileCreate(PathBuf, #[source] std::io::Error),

    #[error("I/O error while writing export")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode CSV record")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode JSON report")]
    Json(#[from] serde_json::Error),
}
