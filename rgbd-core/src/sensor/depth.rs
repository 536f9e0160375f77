use ndarray::Zip;

use crate::image::{ImageDepth16U, ImageDepth32F};

/// Deepest value, in meters, the 16-bit depth image represents without
/// saturating. Depth ranges beyond this draw a warning.
pub const MAX_VALID_DEPTH_16U: f64 = (u16::MAX - 1) as f64 / 1000.0;

/// Depth, in meters, at and beyond which 16-bit depth saturates at `u16::MAX`
pub const DEPTH_16U_OVERFLOW_DISTANCE: f64 = u16::MAX as f64 / 1000.0;

/// Quantize one depth from meters to whole millimeters.
///
/// Depths at or past the overflow distance (including +inf) saturate at
/// `u16::MAX`. NaN, zero and negative depths map to 0. Everything else
/// truncates toward zero.
pub fn depth_to_millimeters(depth: f32) -> u16 {
    let meters = f64::from(depth);
    if meters.is_nan() || meters <= 0.0 {
        0
    } else if meters >= DEPTH_16U_OVERFLOW_DISTANCE {
        u16::MAX
    } else {
        (meters * 1000.0) as u16
    }
}

/// Convert a metric depth image into a millimeter image of the same size
pub fn convert_depth_32f_to_16u(depth_32f: &ImageDepth32F) -> ImageDepth16U {
    let (width, height) = depth_32f.size();
    let mut depth_16u = ImageDepth16U::new(width, height);

    Zip::from(depth_16u.data_mut())
        .and(depth_32f.data())
        .par_for_each(|mm, &meters| *mm = depth_to_millimeters(meters));

    depth_16u
}
