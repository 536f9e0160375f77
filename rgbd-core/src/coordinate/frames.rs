use std::fmt;

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::RigidTransform;
use crate::error::Result;
use crate::systems::Context;

/// Identifier of a frame registered with the geometry service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameId(u64);

impl FrameId {
    /// The world frame. Its pose is the identity and never needs a lookup.
    pub const WORLD: FrameId = FrameId(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub const fn is_world(&self) -> bool {
        self.0 == Self::WORLD.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameId({})", self.0)
    }
}

/// Pose of a frame as translation plus unit quaternion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseVector {
    pub translation: Vector3<f64>,
    pub rotation: UnitQuaternion<f64>,
}

impl PoseVector {
    pub fn from_transform(transform: &RigidTransform) -> Self {
        Self {
            translation: transform.translation.vector,
            rotation: transform.rotation,
        }
    }

    pub fn to_transform(&self) -> RigidTransform {
        Isometry3::from_parts(Translation3::from(self.translation), self.rotation)
    }
}

impl Default for PoseVector {
    fn default() -> Self {
        Self::from_transform(&RigidTransform::identity())
    }
}

/// Pose of the sensor body B in the world, `X_WB = X_WP * X_PB`.
///
/// The parent pose is looked up through the context's geometry query on
/// every call; nothing is cached between calls. A world parent needs no
/// lookup and succeeds even when no geometry query is connected.
pub fn compute_body_world_pose(
    parent_frame_id: FrameId,
    x_pb: &RigidTransform,
    context: &Context<'_>,
) -> Result<RigidTransform> {
    if parent_frame_id.is_world() {
        return Ok(*x_pb);
    }

    let query = context.geometry_query()?;
    let x_wp = query.world_pose(parent_frame_id)?;
    Ok(x_wp * x_pb)
}
