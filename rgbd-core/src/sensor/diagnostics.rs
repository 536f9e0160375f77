use std::fmt;

use tracing::warn;

use super::depth::MAX_VALID_DEPTH_16U;
use crate::camera::{CameraInfo, ColorRenderCamera, DepthRenderCamera};

/// Focal lengths and principal point of one camera, for reporting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntrinsicsSummary {
    pub focal_length: (f64, f64),
    pub principal_point: (f64, f64),
}

impl From<&CameraInfo> for IntrinsicsSummary {
    fn from(info: &CameraInfo) -> Self {
        Self {
            focal_length: info.focal_length(),
            principal_point: info.principal_point(),
        }
    }
}

/// Non-fatal construction warning
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// At least one camera is not radially symmetric and centered
    ComplexIntrinsics {
        color: IntrinsicsSummary,
        depth: IntrinsicsSummary,
    },
    /// The depth range reaches past what 16-bit depth can hold
    Depth16USaturation { max_depth: f64, max_valid_depth: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::ComplexIntrinsics { color, depth } => write!(
                f,
                "Constructing an RGB-D sensor with a \"complex\" camera specification. \
                 For now, the camera must be radially symmetric and centered on the image. \
                 Cameras provided:\n  Color - focal lengths ({}, {}), principal point ({}, {})\n  \
                 Depth - focal lengths ({}, {}), principal point ({}, {})",
                color.focal_length.0,
                color.focal_length.1,
                color.principal_point.0,
                color.principal_point.1,
                depth.focal_length.0,
                depth.focal_length.1,
                depth.principal_point.0,
                depth.principal_point.1,
            ),
            Diagnostic::Depth16USaturation {
                max_depth,
                max_valid_depth,
            } => write!(
                f,
                "Specified max depth is {max_depth} m > max valid depth for 16 bits \
                 {max_valid_depth} m. depth_image_16u might not be able to capture the \
                 full depth range."
            ),
        }
    }
}

/// Check both cameras and log each warning found
pub(crate) fn check_cameras(
    color_camera: &ColorRenderCamera,
    depth_camera: &DepthRenderCamera,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let color = color_camera.core().intrinsics();
    let depth = depth_camera.core().intrinsics();
    if !color.is_simple() || !depth.is_simple() {
        diagnostics.push(Diagnostic::ComplexIntrinsics {
            color: color.into(),
            depth: depth.into(),
        });
    }

    let max_depth = depth_camera.depth_range().max_depth();
    if max_depth > MAX_VALID_DEPTH_16U {
        diagnostics.push(Diagnostic::Depth16USaturation {
            max_depth,
            max_valid_depth: MAX_VALID_DEPTH_16U,
        });
    }

    for diagnostic in &diagnostics {
        warn!("{diagnostic}");
    }
    diagnostics
}
