//! Camera intrinsics and render camera specifications

mod intrinsics;
mod render;

pub use intrinsics::CameraInfo;
pub use render::{
    CameraPoses, CameraProperties, ClippingRange, ColorRenderCamera, DepthCameraProperties,
    DepthRange, DepthRenderCamera, RenderCameraCore, LEGACY_FAR_CLIP, LEGACY_NEAR_CLIP,
};
