// Error types module

use thiserror::Error;

use crate::config::ConfigError;
use crate::http::HttpError;
use crate::id::IdError;
use crate::json::JsonError;
use crate::table::TableError;
use crate::thumbnail::ImageError;
use crate::watermark::WatermarkError;

/// Crate-wide error wrapping every module error
///
/// Module functions return their own error type; this exists for callers
/// that mix several modules and want a single `?` target.
#[derive(Error, Debug)]
pub enum BizkitError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("Watermark error: {0}")]
    Watermark(#[from] WatermarkError),

    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error("JSON error: {0}")]
    Json(#[from] JsonError),

    #[error("Id error: {0}")]
    Id(#[from] IdError),

    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BizkitError>;
