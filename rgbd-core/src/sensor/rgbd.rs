use tracing::debug;

use super::depth::convert_depth_32f_to_16u;
use super::diagnostics::{check_cameras, Diagnostic};
use crate::camera::{
    CameraInfo, CameraPoses, CameraProperties, ColorRenderCamera, DepthCameraProperties,
    DepthRenderCamera,
};
use crate::coordinate::{compute_body_world_pose, FrameId, PoseVector, RigidTransform};
use crate::error::Result;
use crate::image::{ImageDepth16U, ImageDepth32F, ImageLabel16I, ImageRgba8U};
use crate::systems::{Context, OutputPort, OutputValue, SensorSystem};

/// RGB-D camera rigidly attached to a frame of the scene.
///
/// Frames involved:
/// - P: parent frame the sensor is mounted on (may be the world)
/// - B: sensor body, fixed in P by `X_PB`
/// - C, D: color and depth optical frames, fixed in B by each camera's
///   sensor pose
///
/// Every output is recomputed from the context on each call. The label
/// image shares the color camera.
#[derive(Debug, Clone)]
pub struct RgbdSensor {
    parent_frame_id: FrameId,
    x_pb: RigidTransform,
    color_camera: ColorRenderCamera,
    depth_camera: DepthRenderCamera,
    diagnostics: Vec<Diagnostic>,
}

impl RgbdSensor {
    /// Create a sensor from full camera specifications.
    ///
    /// Cameras that are not radially symmetric and centered, or a depth
    /// range past the 16-bit limit, are reported through `tracing` and
    /// [`RgbdSensor::diagnostics`] without failing construction.
    pub fn new(
        parent_frame_id: FrameId,
        x_pb: RigidTransform,
        color_camera: ColorRenderCamera,
        depth_camera: DepthRenderCamera,
    ) -> Self {
        let diagnostics = check_cameras(&color_camera, &depth_camera);
        Self {
            parent_frame_id,
            x_pb,
            color_camera,
            depth_camera,
            diagnostics,
        }
    }

    /// Create a sensor from separate simple color and depth properties
    pub fn from_properties(
        parent_frame_id: FrameId,
        x_pb: RigidTransform,
        color_properties: &CameraProperties,
        depth_properties: &DepthCameraProperties,
        camera_poses: &CameraPoses,
        show_window: bool,
    ) -> Result<Self> {
        let color_camera =
            ColorRenderCamera::from_properties(color_properties, show_window, camera_poses.x_bc)?;
        let depth_camera = DepthRenderCamera::from_properties(depth_properties, camera_poses.x_bd)?;
        Ok(Self::new(parent_frame_id, x_pb, color_camera, depth_camera))
    }

    /// Create a sensor whose color and depth cameras share one set of properties
    pub fn from_depth_properties(
        parent_frame_id: FrameId,
        x_pb: RigidTransform,
        properties: &DepthCameraProperties,
        camera_poses: &CameraPoses,
        show_window: bool,
    ) -> Result<Self> {
        Self::from_properties(
            parent_frame_id,
            x_pb,
            &properties.color_properties(),
            properties,
            camera_poses,
            show_window,
        )
    }

    pub fn parent_frame_id(&self) -> FrameId {
        self.parent_frame_id
    }

    /// Pose of the sensor body in its parent frame
    pub fn x_pb(&self) -> &RigidTransform {
        &self.x_pb
    }

    pub fn color_camera(&self) -> &ColorRenderCamera {
        &self.color_camera
    }

    pub fn depth_camera(&self) -> &DepthRenderCamera {
        &self.depth_camera
    }

    pub fn color_camera_info(&self) -> &CameraInfo {
        self.color_camera.core().intrinsics()
    }

    pub fn depth_camera_info(&self) -> &CameraInfo {
        self.depth_camera.core().intrinsics()
    }

    /// Warnings raised at construction
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Pose of the sensor body in the world, `X_WB`
    pub fn body_world_pose(&self, context: &Context<'_>) -> Result<RigidTransform> {
        compute_body_world_pose(self.parent_frame_id, &self.x_pb, context)
    }

    /// Pose of the color optical frame in the world, `X_WC`
    pub fn color_camera_world_pose(&self, context: &Context<'_>) -> Result<RigidTransform> {
        let x_wb = self.body_world_pose(context)?;
        Ok(x_wb * self.color_camera.core().sensor_pose_in_camera_body())
    }

    /// Pose of the depth optical frame in the world, `X_WD`
    pub fn depth_camera_world_pose(&self, context: &Context<'_>) -> Result<RigidTransform> {
        let x_wb = self.body_world_pose(context)?;
        Ok(x_wb * self.depth_camera.core().sensor_pose_in_camera_body())
    }

    fn x_pc(&self) -> RigidTransform {
        self.x_pb * self.color_camera.core().sensor_pose_in_camera_body()
    }

    fn x_pd(&self) -> RigidTransform {
        self.x_pb * self.depth_camera.core().sensor_pose_in_camera_body()
    }

    pub fn calc_color_image(&self, context: &Context<'_>) -> Result<ImageRgba8U> {
        let query = context.geometry_query()?;
        let (width, height) = self.color_camera_info().image_size();
        let mut color_image = ImageRgba8U::new(width, height);

        debug!(time = context.time(), parent = %self.parent_frame_id, "rendering color image");
        query.render_color_image(
            &self.color_camera,
            self.parent_frame_id,
            &self.x_pc(),
            self.color_camera.show_window(),
            &mut color_image,
        )?;
        Ok(color_image)
    }

    pub fn calc_depth_image_32f(&self, context: &Context<'_>) -> Result<ImageDepth32F> {
        let query = context.geometry_query()?;
        let (width, height) = self.depth_camera_info().image_size();
        let mut depth_image = ImageDepth32F::new(width, height);

        debug!(time = context.time(), parent = %self.parent_frame_id, "rendering depth image");
        query.render_depth_image(
            &self.depth_camera,
            self.parent_frame_id,
            &self.x_pd(),
            &mut depth_image,
        )?;
        Ok(depth_image)
    }

    pub fn calc_depth_image_16u(&self, context: &Context<'_>) -> Result<ImageDepth16U> {
        let depth_32f = self.calc_depth_image_32f(context)?;
        Ok(convert_depth_32f_to_16u(&depth_32f))
    }

    pub fn calc_label_image(&self, context: &Context<'_>) -> Result<ImageLabel16I> {
        let query = context.geometry_query()?;
        let (width, height) = self.color_camera_info().image_size();
        let mut label_image = ImageLabel16I::new(width, height);

        debug!(time = context.time(), parent = %self.parent_frame_id, "rendering label image");
        query.render_label_image(
            &self.color_camera,
            self.parent_frame_id,
            &self.x_pc(),
            self.color_camera.show_window(),
            &mut label_image,
        )?;
        Ok(label_image)
    }

    /// World pose of the sensor body. Never renders.
    pub fn calc_x_wb(&self, context: &Context<'_>) -> Result<PoseVector> {
        let x_wb = self.body_world_pose(context)?;
        Ok(PoseVector::from_transform(&x_wb))
    }
}

impl SensorSystem for RgbdSensor {
    fn output_ports(&self) -> Vec<OutputPort> {
        OutputPort::ALL.to_vec()
    }

    fn eval(&self, port: OutputPort, context: &Context<'_>) -> Result<OutputValue> {
        Ok(match port {
            OutputPort::ColorImage => OutputValue::ColorImage(self.calc_color_image(context)?),
            OutputPort::DepthImage32F => {
                OutputValue::DepthImage32F(self.calc_depth_image_32f(context)?)
            }
            OutputPort::DepthImage16U => {
                OutputValue::DepthImage16U(self.calc_depth_image_16u(context)?)
            }
            OutputPort::LabelImage => OutputValue::LabelImage(self.calc_label_image(context)?),
            OutputPort::XWB => OutputValue::XWB(self.calc_x_wb(context)?),
        })
    }
}
