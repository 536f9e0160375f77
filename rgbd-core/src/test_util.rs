//! Deterministic geometry service for unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::camera::{ColorRenderCamera, DepthRenderCamera, RenderCameraCore};
use crate::coordinate::{FrameId, RigidTransform};
use crate::error::GeometryError;
use crate::geometry::GeometryQuery;
use crate::image::{label_sentinel, ImageDepth32F, ImageLabel16I, ImageRgba8U};

pub const BACKGROUND: [u8; 4] = [204, 229, 255, 255];

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Color {
        parent: FrameId,
        x_pc: RigidTransform,
        show_window: bool,
    },
    Depth {
        parent: FrameId,
        x_pc: RigidTransform,
    },
    Label {
        parent: FrameId,
        x_pc: RigidTransform,
        show_window: bool,
    },
}

/// Empty scene: background color, every depth at the far end of the
/// camera's range, every label empty.
#[derive(Debug, Default)]
pub struct StubGeometry {
    frames: HashMap<FrameId, RigidTransform>,
    supported_renderer: Option<String>,
    depth_override: Option<f32>,
    world_pose_calls: Cell<usize>,
    render_calls: RefCell<Vec<RenderCall>>,
}

impl StubGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame(mut self, frame_id: FrameId, x_wf: RigidTransform) -> Self {
        self.frames.insert(frame_id, x_wf);
        self
    }

    pub fn with_supported_renderer(mut self, name: &str) -> Self {
        self.supported_renderer = Some(name.to_string());
        self
    }

    /// Report `depth` everywhere instead of the camera's max depth
    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth_override = Some(depth);
        self
    }

    pub fn world_pose_calls(&self) -> usize {
        self.world_pose_calls.get()
    }

    pub fn render_calls(&self) -> Vec<RenderCall> {
        self.render_calls.borrow().clone()
    }

    fn check(&self, core: &RenderCameraCore, parent: FrameId) -> Result<(), GeometryError> {
        if let Some(name) = &self.supported_renderer {
            if core.renderer_name() != name {
                return Err(GeometryError::UnsupportedRenderer(
                    core.renderer_name().to_string(),
                ));
            }
        }
        if !parent.is_world() && !self.frames.contains_key(&parent) {
            return Err(GeometryError::UnknownFrame(parent));
        }
        Ok(())
    }
}

impl GeometryQuery for StubGeometry {
    fn world_pose(&self, frame_id: FrameId) -> Result<RigidTransform, GeometryError> {
        self.world_pose_calls.set(self.world_pose_calls.get() + 1);
        match self.frames.get(&frame_id) {
            Some(x_wf) => Ok(*x_wf),
            None if frame_id.is_world() => Ok(RigidTransform::identity()),
            None => Err(GeometryError::UnknownFrame(frame_id)),
        }
    }

    fn render_color_image(
        &self,
        camera: &ColorRenderCamera,
        parent_frame: FrameId,
        x_pc: &RigidTransform,
        show_window: bool,
        color_image_out: &mut ImageRgba8U,
    ) -> Result<(), GeometryError> {
        self.check(camera.core(), parent_frame)?;
        self.render_calls.borrow_mut().push(RenderCall::Color {
            parent: parent_frame,
            x_pc: *x_pc,
            show_window,
        });
        color_image_out.fill_rgba(BACKGROUND);
        Ok(())
    }

    fn render_depth_image(
        &self,
        camera: &DepthRenderCamera,
        parent_frame: FrameId,
        x_pc: &RigidTransform,
        depth_image_out: &mut ImageDepth32F,
    ) -> Result<(), GeometryError> {
        self.check(camera.core(), parent_frame)?;
        self.render_calls.borrow_mut().push(RenderCall::Depth {
            parent: parent_frame,
            x_pc: *x_pc,
        });
        let depth = self
            .depth_override
            .unwrap_or(camera.depth_range().max_depth() as f32);
        depth_image_out.fill(depth);
        Ok(())
    }

    fn render_label_image(
        &self,
        camera: &ColorRenderCamera,
        parent_frame: FrameId,
        x_pc: &RigidTransform,
        show_window: bool,
        label_image_out: &mut ImageLabel16I,
    ) -> Result<(), GeometryError> {
        self.check(camera.core(), parent_frame)?;
        self.render_calls.borrow_mut().push(RenderCall::Label {
            parent: parent_frame,
            x_pc: *x_pc,
            show_window,
        });
        label_image_out.fill(label_sentinel::EMPTY);
        Ok(())
    }
}
