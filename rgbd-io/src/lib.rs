//! Sensor configuration files and image export for RGB-D sensors

pub mod config;
pub mod error;
pub mod image;

pub use config::{SensorConfig, TransformConfig};
pub use error::{IoError, Result};
