use thiserror::Error;

use crate::coordinate::FrameId;

/// Common errors across the RGB-D sensor pipeline
#[derive(Error, Debug)]
pub enum RgbdError {
    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("Input port '{0}' is not connected")]
    InputNotConnected(&'static str),

    #[error("Invalid sampling period: {0} (must be positive)")]
    InvalidPeriod(f64),

    #[error("Unknown output port: {0}")]
    UnknownOutputPort(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("Invalid image size: {width}x{height} (both must be positive)")]
    InvalidImageSize { width: usize, height: usize },

    #[error("Invalid focal length: ({fx}, {fy}) (must be positive and finite)")]
    InvalidFocalLength { fx: f64, fy: f64 },

    #[error("Invalid field of view: {0} (must be in (0, pi))")]
    InvalidFieldOfView(f64),

    #[error("Invalid clipping range: [{near}, {far}] (need 0 < near < far)")]
    InvalidClippingRange { near: f64, far: f64 },

    #[error("Invalid depth range: [{min_depth}, {max_depth}] (need 0 < min < max)")]
    InvalidDepthRange { min_depth: f64, max_depth: f64 },
}

/// Failures reported by the geometry/rendering collaborator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Unknown frame: {0}")]
    UnknownFrame(FrameId),

    #[error("Unsupported renderer: {0}")]
    UnsupportedRenderer(String),

    #[error("Render failed: {0}")]
    RenderFailed(String),
}

pub type Result<T> = std::result::Result<T, RgbdError>;
