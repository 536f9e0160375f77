//! RGB-D sensor models (continuous and sampled)

mod depth;
mod diagnostics;
pub mod discrete;
pub mod rgbd;

pub use depth::{
    convert_depth_32f_to_16u, depth_to_millimeters, DEPTH_16U_OVERFLOW_DISTANCE,
    MAX_VALID_DEPTH_16U,
};
pub use diagnostics::{Diagnostic, IntrinsicsSummary};
pub use discrete::{RgbdSensorDiscrete, DEFAULT_PERIOD, DEFAULT_RENDER_LABEL_IMAGE};
pub use rgbd::RgbdSensor;
