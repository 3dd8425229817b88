/// Error type shared by the grid state, imaging and export modules
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    /// The grid cannot be laid out (zero extents, or padding eats the canvas)
    #[error("invalid grid configuration: {0}")]
    InvalidConfig(String),

    /// A settings field is outside its allowed range or not a number
    #[error("{field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("invalid color '{0}' (expected transparent, a color name or #rrggbb)")]
    InvalidColor(String),

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{} has no pixels", .0.display())]
    EmptyImage(PathBuf),

    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("background task failed: {0}")]
    Task(String),
}

impl From<tokio::task::JoinError> for GridError {
    fn from(err: tokio::task::JoinError) -> Self {
        GridError::Task(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
