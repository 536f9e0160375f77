use super::RigidTransform;
use nalgebra::{Translation3, UnitQuaternion};

/// Build a rigid transform from a translation and roll/pitch/yaw angles (radians)
pub fn from_translation_rpy(translation: [f64; 3], rpy: [f64; 3]) -> RigidTransform {
    let [x, y, z] = translation;
    let [roll, pitch, yaw] = rpy;

    RigidTransform::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

/// Split a rigid transform into translation and roll/pitch/yaw angles (radians)
pub fn to_translation_rpy(transform: &RigidTransform) -> ([f64; 3], [f64; 3]) {
    let t = transform.translation.vector;
    let (roll, pitch, yaw) = transform.rotation.euler_angles();
    ([t.x, t.y, t.z], [roll, pitch, yaw])
}
