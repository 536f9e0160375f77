use std::path::PathBuf;

use rgbd_core::RgbdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error on {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image size mismatch: expected {expected:?}, found {found:?}")]
    SizeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("Image too large for PNG: {width}x{height}")]
    ImageTooLarge { width: usize, height: usize },

    #[error("Sensor error: {0}")]
    Sensor(#[from] RgbdError),
}

pub type Result<T> = std::result::Result<T, IoError>;
