//! Coordinate frames, rigid transforms and the body pose pipeline

mod frames;
mod transforms;

pub use frames::{compute_body_world_pose, FrameId, PoseVector};
pub use transforms::{from_translation_rpy, to_translation_rpy};

use nalgebra::Isometry3;

/// Rigid transform between two frames. `X_AB` maps frame B into frame A.
pub type RigidTransform = Isometry3<f64>;
