use serde::{Deserialize, Serialize};

use super::CameraInfo;
use crate::coordinate::RigidTransform;
use crate::error::CameraError;

/// Near clipping plane used for cameras built from simple properties
pub const LEGACY_NEAR_CLIP: f64 = 0.01;
/// Far clipping plane used for cameras built from simple properties
pub const LEGACY_FAR_CLIP: f64 = 10.0;

/// Near and far clipping planes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippingRange {
    near: f64,
    far: f64,
}

impl ClippingRange {
    pub fn new(near: f64, far: f64) -> Result<Self, CameraError> {
        if !(near > 0.0 && far.is_finite() && near < far) {
            return Err(CameraError::InvalidClippingRange { near, far });
        }
        Ok(Self { near, far })
    }

    pub fn legacy() -> Self {
        Self {
            near: LEGACY_NEAR_CLIP,
            far: LEGACY_FAR_CLIP,
        }
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }
}

/// Range of depths a depth camera reports as valid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    min_depth: f64,
    max_depth: f64,
}

impl DepthRange {
    pub fn new(min_depth: f64, max_depth: f64) -> Result<Self, CameraError> {
        if !(min_depth > 0.0 && max_depth.is_finite() && min_depth < max_depth) {
            return Err(CameraError::InvalidDepthRange {
                min_depth,
                max_depth,
            });
        }
        Ok(Self {
            min_depth,
            max_depth,
        })
    }

    pub fn min_depth(&self) -> f64 {
        self.min_depth
    }

    pub fn max_depth(&self) -> f64 {
        self.max_depth
    }
}

/// State shared by color and depth render cameras
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCameraCore {
    renderer_name: String,
    intrinsics: CameraInfo,
    clipping: ClippingRange,
    x_bs: RigidTransform,
}

impl RenderCameraCore {
    /// `x_bs` is the pose of the optical sensor frame S in the camera body frame B
    pub fn new(
        renderer_name: impl Into<String>,
        intrinsics: CameraInfo,
        clipping: ClippingRange,
        x_bs: RigidTransform,
    ) -> Self {
        Self {
            renderer_name: renderer_name.into(),
            intrinsics,
            clipping,
            x_bs,
        }
    }

    pub fn renderer_name(&self) -> &str {
        &self.renderer_name
    }

    pub fn intrinsics(&self) -> &CameraInfo {
        &self.intrinsics
    }

    pub fn clipping(&self) -> &ClippingRange {
        &self.clipping
    }

    pub fn sensor_pose_in_camera_body(&self) -> &RigidTransform {
        &self.x_bs
    }
}

/// Full specification of a color (and label) camera
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRenderCamera {
    core: RenderCameraCore,
    show_window: bool,
}

impl ColorRenderCamera {
    pub fn new(core: RenderCameraCore, show_window: bool) -> Self {
        Self { core, show_window }
    }

    /// Build from simple properties with the legacy clipping planes
    pub fn from_properties(
        props: &CameraProperties,
        show_window: bool,
        x_bc: RigidTransform,
    ) -> Result<Self, CameraError> {
        let intrinsics = CameraInfo::from_fov_y(props.width, props.height, props.fov_y)?;
        let core = RenderCameraCore::new(
            props.renderer_name.clone(),
            intrinsics,
            ClippingRange::legacy(),
            x_bc,
        );
        Ok(Self::new(core, show_window))
    }

    pub fn core(&self) -> &RenderCameraCore {
        &self.core
    }

    pub fn show_window(&self) -> bool {
        self.show_window
    }
}

/// Full specification of a depth camera
#[derive(Debug, Clone, PartialEq)]
pub struct DepthRenderCamera {
    core: RenderCameraCore,
    depth_range: DepthRange,
}

impl DepthRenderCamera {
    pub fn new(core: RenderCameraCore, depth_range: DepthRange) -> Self {
        Self { core, depth_range }
    }

    /// Build from simple properties with the legacy clipping planes
    pub fn from_properties(
        props: &DepthCameraProperties,
        x_bd: RigidTransform,
    ) -> Result<Self, CameraError> {
        let intrinsics = CameraInfo::from_fov_y(props.width, props.height, props.fov_y)?;
        let depth_range = DepthRange::new(props.z_near, props.z_far)?;
        let core = RenderCameraCore::new(
            props.renderer_name.clone(),
            intrinsics,
            ClippingRange::legacy(),
            x_bd,
        );
        Ok(Self::new(core, depth_range))
    }

    pub fn core(&self) -> &RenderCameraCore {
        &self.core
    }

    pub fn depth_range(&self) -> &DepthRange {
        &self.depth_range
    }
}

/// Simple color camera description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraProperties {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view in radians
    pub fov_y: f64,
    pub renderer_name: String,
}

/// Simple depth camera description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthCameraProperties {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view in radians
    pub fov_y: f64,
    pub renderer_name: String,
    /// Minimum valid depth in meters
    pub z_near: f64,
    /// Maximum valid depth in meters
    pub z_far: f64,
}

impl DepthCameraProperties {
    /// The color half of these properties
    pub fn color_properties(&self) -> CameraProperties {
        CameraProperties {
            width: self.width,
            height: self.height,
            fov_y: self.fov_y,
            renderer_name: self.renderer_name.clone(),
        }
    }
}

/// Poses of the color sensor C and depth sensor D in the camera body frame B
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPoses {
    pub x_bc: RigidTransform,
    pub x_bd: RigidTransform,
}

impl Default for CameraPoses {
    fn default() -> Self {
        Self {
            x_bc: RigidTransform::identity(),
            x_bd: RigidTransform::identity(),
        }
    }
}
