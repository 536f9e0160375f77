pub mod camera;
pub mod coordinate;
pub mod error;
pub mod geometry;
pub mod image;
pub mod sensor;
pub mod systems;

#[cfg(test)]
mod test_util;

pub use camera::{CameraInfo, CameraPoses, CameraProperties, DepthCameraProperties};
pub use coordinate::{FrameId, PoseVector, RigidTransform};
pub use error::{CameraError, GeometryError, Result, RgbdError};
pub use geometry::GeometryQuery;
pub use sensor::{RgbdSensor, RgbdSensorDiscrete};
pub use systems::{Context, OutputPort, SensorSystem};
