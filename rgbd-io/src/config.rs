use std::fs;
use std::path::Path;

use rgbd_core::coordinate::{from_translation_rpy, to_translation_rpy};
use rgbd_core::sensor::{DEFAULT_PERIOD, DEFAULT_RENDER_LABEL_IMAGE};
use rgbd_core::{
    CameraPoses, CameraProperties, DepthCameraProperties, FrameId, RgbdSensor,
    RgbdSensorDiscrete, RigidTransform,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{IoError, Result};

/// Rigid transform as translation (meters) plus roll/pitch/yaw (radians)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default)]
    pub translation: [f64; 3],
    #[serde(default)]
    pub rpy: [f64; 3],
}

impl TransformConfig {
    pub fn to_transform(&self) -> RigidTransform {
        from_translation_rpy(self.translation, self.rpy)
    }

    pub fn from_transform(transform: &RigidTransform) -> Self {
        let (translation, rpy) = to_translation_rpy(transform);
        Self { translation, rpy }
    }
}

/// Description of a whole RGB-D sensor.
///
/// When `color` is absent the depth properties drive both cameras.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Parent frame id, 0 for the world
    #[serde(default)]
    pub parent_frame: u64,
    #[serde(default)]
    pub x_pb: TransformConfig,
    #[serde(default)]
    pub color: Option<CameraProperties>,
    pub depth: DepthCameraProperties,
    #[serde(default)]
    pub x_bc: TransformConfig,
    #[serde(default)]
    pub x_bd: TransformConfig,
    #[serde(default)]
    pub show_window: bool,
    /// Sampling period in seconds for the discrete sensor
    #[serde(default)]
    pub period: Option<f64>,
    #[serde(default)]
    pub render_label_image: Option<bool>,
}

impl SensorConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| IoError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), "loaded sensor config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn parent_frame_id(&self) -> FrameId {
        FrameId::new(self.parent_frame)
    }

    pub fn camera_poses(&self) -> CameraPoses {
        CameraPoses {
            x_bc: self.x_bc.to_transform(),
            x_bd: self.x_bd.to_transform(),
        }
    }

    /// Build the continuous sensor, validating both cameras
    pub fn build_sensor(&self) -> Result<RgbdSensor> {
        let parent = self.parent_frame_id();
        let x_pb = self.x_pb.to_transform();
        let poses = self.camera_poses();

        let sensor = match &self.color {
            Some(color) => RgbdSensor::from_properties(
                parent,
                x_pb,
                color,
                &self.depth,
                &poses,
                self.show_window,
            )?,
            None => RgbdSensor::from_depth_properties(
                parent,
                x_pb,
                &self.depth,
                &poses,
                self.show_window,
            )?,
        };
        info!(
            %parent,
            warnings = sensor.diagnostics().len(),
            "built RGB-D sensor"
        );
        Ok(sensor)
    }

    /// Build the sampled sensor, falling back to 30 Hz with labels on
    pub fn build_discrete(&self) -> Result<RgbdSensorDiscrete> {
        let period = self.period.unwrap_or(DEFAULT_PERIOD);
        let render_label_image = self
            .render_label_image
            .unwrap_or(DEFAULT_RENDER_LABEL_IMAGE);
        let discrete = RgbdSensorDiscrete::new(self.build_sensor()?, period, render_label_image)?;
        Ok(discrete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgbd_core::RgbdError;
    use rgbd_core::error::CameraError;

    const DEPTH_ONLY: &str = r#"{
        "depth": {
            "width": 640,
            "height": 480,
            "fov_y": 0.8,
            "renderer_name": "renderer",
            "z_near": 0.1,
            "z_far": 5.0
        }
    }"#;

    #[test]
    fn test_defaults() {
        let config = SensorConfig::from_json_str(DEPTH_ONLY).unwrap();
        assert_eq!(config.parent_frame_id(), FrameId::WORLD);
        assert_eq!(config.x_pb, TransformConfig::default());
        assert!(config.color.is_none());
        assert!(!config.show_window);

        let sensor = config.build_sensor().unwrap();
        assert_eq!(sensor.color_camera_info().image_size(), (640, 480));
        assert_eq!(sensor.depth_camera_info().image_size(), (640, 480));
        assert!(sensor.diagnostics().is_empty());

        let discrete = config.build_discrete().unwrap();
        assert_eq!(discrete.period(), DEFAULT_PERIOD);
        assert!(discrete.samples_label_image());
    }

    #[test]
    fn test_separate_color_camera() {
        let json = r#"{
            "parent_frame": 7,
            "x_pb": { "translation": [0.0, 0.0, 1.0], "rpy": [0.0, 0.0, 1.5707963267948966] },
            "color": { "width": 320, "height": 240, "fov_y": 1.0, "renderer_name": "renderer" },
            "depth": {
                "width": 160, "height": 120, "fov_y": 1.0,
                "renderer_name": "renderer", "z_near": 0.2, "z_far": 3.0
            },
            "x_bd": { "translation": [0.05, 0.0, 0.0] },
            "period": 0.1,
            "render_label_image": false
        }"#;
        let config = SensorConfig::from_json_str(json).unwrap();
        let sensor = config.build_sensor().unwrap();
        assert_eq!(sensor.parent_frame_id(), FrameId::new(7));
        assert_eq!(sensor.color_camera_info().image_size(), (320, 240));
        assert_eq!(sensor.depth_camera_info().image_size(), (160, 120));
        assert!((sensor.x_pb().translation.vector.z - 1.0).abs() < 1e-12);
        assert_eq!(
            sensor
                .depth_camera()
                .core()
                .sensor_pose_in_camera_body()
                .translation
                .vector
                .x,
            0.05
        );

        let discrete = config.build_discrete().unwrap();
        assert_eq!(discrete.period(), 0.1);
        assert!(!discrete.samples_label_image());
    }

    #[test]
    fn test_invalid_camera_rejected() {
        let mut config = SensorConfig::from_json_str(DEPTH_ONLY).unwrap();
        config.depth.width = 0;
        assert!(matches!(
            config.build_sensor(),
            Err(IoError::Sensor(RgbdError::Camera(CameraError::InvalidImageSize { .. })))
        ));
    }

    #[test]
    fn test_invalid_period_rejected() {
        let mut config = SensorConfig::from_json_str(DEPTH_ONLY).unwrap();
        config.period = Some(-0.5);
        assert!(matches!(
            config.build_discrete(),
            Err(IoError::Sensor(RgbdError::InvalidPeriod(_)))
        ));
    }

    #[test]
    fn test_missing_depth_is_parse_error() {
        assert!(matches!(
            SensorConfig::from_json_str(r#"{ "parent_frame": 1 }"#),
            Err(IoError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = SensorConfig::from_json_str(DEPTH_ONLY).unwrap();
        config.x_bc = TransformConfig::from_transform(&from_translation_rpy(
            [0.0, 0.02, 0.0],
            [0.0, 0.0, 0.0],
        ));
        let json = config.to_json_string().unwrap();
        assert_eq!(SensorConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_from_missing_path() {
        let path = std::env::temp_dir().join("rgbd-io-no-such-config.json");
        assert!(matches!(
            SensorConfig::from_path(&path),
            Err(IoError::File { .. })
        ));
    }
}
