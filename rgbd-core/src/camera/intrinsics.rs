use std::f64::consts::PI;

use nalgebra::Matrix3;

use crate::error::CameraError;

/// Pinhole intrinsics of a render camera
#[derive(Debug, Clone, PartialEq)]
pub struct CameraInfo {
    width: usize,
    height: usize,
    fx: f64,
    fy: f64,
    cx: f64,
    cy: f64,
}

impl CameraInfo {
    /// Create intrinsics from focal lengths and principal point
    pub fn new(
        width: usize,
        height: usize,
        fx: f64,
        fy: f64,
        cx: f64,
        cy: f64,
    ) -> Result<Self, CameraError> {
        if width == 0 || height == 0 {
            return Err(CameraError::InvalidImageSize { width, height });
        }
        if !(fx.is_finite() && fy.is_finite() && fx > 0.0 && fy > 0.0) {
            return Err(CameraError::InvalidFocalLength { fx, fy });
        }

        Ok(Self {
            width,
            height,
            fx,
            fy,
            cx,
            cy,
        })
    }

    /// Radially symmetric camera centered on the image, from its vertical field of view
    pub fn from_fov_y(width: usize, height: usize, fov_y: f64) -> Result<Self, CameraError> {
        if !(fov_y > 0.0 && fov_y < PI) {
            return Err(CameraError::InvalidFieldOfView(fov_y));
        }
        if width == 0 || height == 0 {
            return Err(CameraError::InvalidImageSize { width, height });
        }

        let focal = height as f64 / (2.0 * (fov_y / 2.0).tan());
        Self::new(
            width,
            height,
            focal,
            focal,
            width as f64 / 2.0 + 0.5,
            height as f64 / 2.0 + 0.5,
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get image dimensions (width, height)
    pub fn image_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get focal lengths
    pub fn focal_length(&self) -> (f64, f64) {
        (self.fx, self.fy)
    }

    /// Get principal point
    pub fn principal_point(&self) -> (f64, f64) {
        (self.cx, self.cy)
    }

    pub fn fov_x(&self) -> f64 {
        2.0 * (self.width as f64 / (2.0 * self.fx)).atan()
    }

    pub fn fov_y(&self) -> f64 {
        2.0 * (self.height as f64 / (2.0 * self.fy)).atan()
    }

    pub fn intrinsic_matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.fx, 0.0, self.cx,
            0.0, self.fy, self.cy,
            0.0, 0.0, 1.0,
        )
    }

    /// True for square pixels with the principal point at the image center.
    ///
    /// Renderers only honor width, height and vertical field of view, so
    /// anything else is approximated.
    pub fn is_simple(&self) -> bool {
        self.fx == self.fy
            && self.cx == self.width as f64 / 2.0 + 0.5
            && self.cy == self.height as f64 / 2.0 + 0.5
    }
}
