use tracing::debug;

use super::RgbdSensor;
use crate::coordinate::PoseVector;
use crate::error::{Result, RgbdError};
use crate::image::{ImageDepth16U, ImageDepth32F, ImageLabel16I, ImageRgba8U};
use crate::systems::{Context, OutputPort, OutputValue, SensorSystem, ZeroOrderHold};

/// Default sampling period, 30 Hz
pub const DEFAULT_PERIOD: f64 = 1.0 / 30.0;
pub const DEFAULT_RENDER_LABEL_IMAGE: bool = true;

/// An [`RgbdSensor`] whose image outputs are sampled at a fixed rate.
///
/// Each image output goes through its own [`ZeroOrderHold`]; all stages
/// share one period and tick together from time zero. The pose output is
/// passed through unsampled, and the geometry query input is forwarded to
/// the inner sensor.
#[derive(Debug, Clone)]
pub struct RgbdSensorDiscrete {
    camera: RgbdSensor,
    period: f64,
    color_image: ZeroOrderHold<ImageRgba8U>,
    depth_image_32f: ZeroOrderHold<ImageDepth32F>,
    depth_image_16u: ZeroOrderHold<ImageDepth16U>,
    label_image: Option<ZeroOrderHold<ImageLabel16I>>,
}

impl RgbdSensorDiscrete {
    /// Wrap `camera`. Stages hold blank images until the first tick is latched.
    pub fn new(camera: RgbdSensor, period: f64, render_label_image: bool) -> Result<Self> {
        if !(period > 0.0 && period.is_finite()) {
            return Err(RgbdError::InvalidPeriod(period));
        }

        let (color_width, color_height) = camera.color_camera_info().image_size();
        let (depth_width, depth_height) = camera.depth_camera_info().image_size();

        let color_image = ZeroOrderHold::new(period, ImageRgba8U::new(color_width, color_height))?;
        let depth_image_32f =
            ZeroOrderHold::new(period, ImageDepth32F::new(depth_width, depth_height))?;
        let depth_image_16u =
            ZeroOrderHold::new(period, ImageDepth16U::new(depth_width, depth_height))?;
        let label_image = if render_label_image {
            Some(ZeroOrderHold::new(
                period,
                ImageLabel16I::new(color_width, color_height),
            )?)
        } else {
            None
        };

        Ok(Self {
            camera,
            period,
            color_image,
            depth_image_32f,
            depth_image_16u,
            label_image,
        })
    }

    /// The wrapped continuous sensor
    pub fn sensor(&self) -> &RgbdSensor {
        &self.camera
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn samples_label_image(&self) -> bool {
        self.label_image.is_some()
    }

    /// Latch every stage from the inner sensor at time zero.
    ///
    /// Any earlier latches are discarded, so this also restarts a sensor
    /// that has already run. Only the geometry query of `context` is used;
    /// the caller supplies it in its time-zero state.
    pub fn initialize(&mut self, context: &Context<'_>) -> Result<()> {
        let context = Context::new(0.0).with_geometry_query(context.geometry_query()?);
        self.color_image.reset();
        self.depth_image_32f.reset();
        self.depth_image_16u.reset();
        if let Some(label_image) = &mut self.label_image {
            label_image.reset();
        }
        self.update(&context)?;
        Ok(())
    }

    /// Latch every stage whose tick `context.time()` lies on.
    ///
    /// All due samples are taken before any stage latches, so a failed
    /// render leaves every stage at its previous tick. Times between ticks
    /// latch nothing; use [`RgbdSensorDiscrete::advance_to`] to catch up.
    /// Returns whether anything latched.
    pub fn update(&mut self, context: &Context<'_>) -> Result<bool> {
        let time = context.time();
        let camera = &self.camera;

        let color_image = self
            .color_image
            .due_tick(time)
            .map(|tick| camera.calc_color_image(context).map(|image| (tick, image)))
            .transpose()?;
        let depth_image_32f = self
            .depth_image_32f
            .due_tick(time)
            .map(|tick| camera.calc_depth_image_32f(context).map(|image| (tick, image)))
            .transpose()?;
        let depth_image_16u = self
            .depth_image_16u
            .due_tick(time)
            .map(|tick| camera.calc_depth_image_16u(context).map(|image| (tick, image)))
            .transpose()?;
        let label_image = self
            .label_image
            .as_ref()
            .and_then(|hold| hold.due_tick(time))
            .map(|tick| camera.calc_label_image(context).map(|image| (tick, image)))
            .transpose()?;

        let mut latched = false;
        if let Some((tick, image)) = color_image {
            self.color_image.latch(tick, image);
            latched = true;
        }
        if let Some((tick, image)) = depth_image_32f {
            self.depth_image_32f.latch(tick, image);
            latched = true;
        }
        if let Some((tick, image)) = depth_image_16u {
            self.depth_image_16u.latch(tick, image);
            latched = true;
        }
        if let (Some((tick, image)), Some(hold)) = (label_image, &mut self.label_image) {
            hold.latch(tick, image);
            latched = true;
        }

        if latched {
            debug!(time, "discrete RGB-D sensor sampled");
        }
        Ok(latched)
    }

    /// Latest tick latched by every stage
    fn last_common_tick(&self) -> Option<u64> {
        [
            self.color_image.last_tick(),
            self.depth_image_32f.last_tick(),
            self.depth_image_16u.last_tick(),
            self.label_image
                .as_ref()
                .map_or(self.color_image.last_tick(), ZeroOrderHold::last_tick),
        ]
        .into_iter()
        .min()
        .flatten()
    }

    /// Tick times up to `until` not yet sampled by every stage
    pub fn pending_update_times(&self, until: f64) -> Vec<f64> {
        self.color_image.ticks_after(self.last_common_tick(), until)
    }

    /// Next tick strictly after `time`
    pub fn next_update_time(&self, time: f64) -> f64 {
        self.color_image.next_update_time(time)
    }

    /// Sample every pending tick up to `until`, asking the host for the
    /// context at each tick time.
    pub fn advance_to<'q, F>(&mut self, until: f64, mut context_at: F) -> Result<()>
    where
        F: FnMut(f64) -> Context<'q>,
    {
        for time in self.pending_update_times(until) {
            let context = context_at(time);
            self.update(&context)?;
        }
        Ok(())
    }

    pub fn color_image(&self) -> &ImageRgba8U {
        self.color_image.value()
    }

    pub fn depth_image_32f(&self) -> &ImageDepth32F {
        self.depth_image_32f.value()
    }

    pub fn depth_image_16u(&self) -> &ImageDepth16U {
        self.depth_image_16u.value()
    }

    /// Held label image, if label sampling was requested
    pub fn label_image(&self) -> Option<&ImageLabel16I> {
        self.label_image.as_ref().map(ZeroOrderHold::value)
    }

    /// Unsampled pose of the sensor body, straight from the inner sensor
    pub fn calc_x_wb(&self, context: &Context<'_>) -> Result<PoseVector> {
        self.camera.calc_x_wb(context)
    }
}

impl SensorSystem for RgbdSensorDiscrete {
    fn output_ports(&self) -> Vec<OutputPort> {
        OutputPort::ALL
            .into_iter()
            .filter(|port| *port != OutputPort::LabelImage || self.samples_label_image())
            .collect()
    }

    fn eval(&self, port: OutputPort, context: &Context<'_>) -> Result<OutputValue> {
        Ok(match port {
            OutputPort::ColorImage => OutputValue::ColorImage(self.color_image().clone()),
            OutputPort::DepthImage32F => OutputValue::DepthImage32F(self.depth_image_32f().clone()),
            OutputPort::DepthImage16U => OutputValue::DepthImage16U(self.depth_image_16u().clone()),
            OutputPort::LabelImage => match self.label_image() {
                Some(label_image) => OutputValue::LabelImage(label_image.clone()),
                None => return Err(RgbdError::UnknownOutputPort(port.name().to_string())),
            },
            OutputPort::XWB => OutputValue::XWB(self.calc_x_wb(context)?),
        })
    }
}
