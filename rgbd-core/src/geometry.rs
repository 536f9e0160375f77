//! Interface to the geometry and rendering service the sensor queries

use crate::camera::{ColorRenderCamera, DepthRenderCamera};
use crate::coordinate::{FrameId, RigidTransform};
use crate::error::GeometryError;
use crate::image::{ImageDepth32F, ImageLabel16I, ImageRgba8U};

/// Read-only view of the scene at one instant.
///
/// Render calls take the camera pose `X_PC` relative to `parent_frame`;
/// the service resolves the parent's world pose itself. Output buffers
/// arrive sized to the camera intrinsics and must not be resized.
pub trait GeometryQuery {
    /// World pose `X_WF` of a registered frame
    fn world_pose(&self, frame_id: FrameId) -> Result<RigidTransform, GeometryError>;

    fn render_color_image(
        &self,
        camera: &ColorRenderCamera,
        parent_frame: FrameId,
        x_pc: &RigidTransform,
        show_window: bool,
        color_image_out: &mut ImageRgba8U,
    ) -> Result<(), GeometryError>;

    fn render_depth_image(
        &self,
        camera: &DepthRenderCamera,
        parent_frame: FrameId,
        x_pc: &RigidTransform,
        depth_image_out: &mut ImageDepth32F,
    ) -> Result<(), GeometryError>;

    fn render_label_image(
        &self,
        camera: &ColorRenderCamera,
        parent_frame: FrameId,
        x_pc: &RigidTransform,
        show_window: bool,
        label_image_out: &mut ImageLabel16I,
    ) -> Result<(), GeometryError>;
}
