use std::fmt;

use super::Context;
use crate::coordinate::PoseVector;
use crate::error::Result;
use crate::image::{ImageDepth16U, ImageDepth32F, ImageLabel16I, ImageRgba8U};

/// Inputs a sensor declares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputPort {
    GeometryQuery,
}

impl InputPort {
    pub const fn name(self) -> &'static str {
        match self {
            InputPort::GeometryQuery => "geometry_query",
        }
    }
}

/// Outputs a sensor may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputPort {
    ColorImage,
    DepthImage32F,
    DepthImage16U,
    LabelImage,
    XWB,
}

impl OutputPort {
    pub const ALL: [OutputPort; 5] = [
        OutputPort::ColorImage,
        OutputPort::DepthImage32F,
        OutputPort::DepthImage16U,
        OutputPort::LabelImage,
        OutputPort::XWB,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            OutputPort::ColorImage => "color_image",
            OutputPort::DepthImage32F => "depth_image_32f",
            OutputPort::DepthImage16U => "depth_image_16u",
            OutputPort::LabelImage => "label_image",
            OutputPort::XWB => "X_WB",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|port| port.name() == name)
    }
}

impl fmt::Display for OutputPort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Value produced on one output port
#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    ColorImage(ImageRgba8U),
    DepthImage32F(ImageDepth32F),
    DepthImage16U(ImageDepth16U),
    LabelImage(ImageLabel16I),
    XWB(PoseVector),
}

impl OutputValue {
    /// Port this value belongs to
    pub fn port(&self) -> OutputPort {
        match self {
            OutputValue::ColorImage(_) => OutputPort::ColorImage,
            OutputValue::DepthImage32F(_) => OutputPort::DepthImage32F,
            OutputValue::DepthImage16U(_) => OutputPort::DepthImage16U,
            OutputValue::LabelImage(_) => OutputPort::LabelImage,
            OutputValue::XWB(_) => OutputPort::XWB,
        }
    }
}

/// A block with named ports whose outputs the host pulls on demand
pub trait SensorSystem {
    fn input_ports(&self) -> &'static [InputPort] {
        &[InputPort::GeometryQuery]
    }

    /// Declared outputs, in declaration order
    fn output_ports(&self) -> Vec<OutputPort>;

    fn has_output_port(&self, name: &str) -> bool {
        OutputPort::from_name(name).is_some_and(|port| self.output_ports().contains(&port))
    }

    /// Compute one output from the context. Fails with `UnknownOutputPort`
    /// for ports this block does not declare.
    fn eval(&self, port: OutputPort, context: &Context<'_>) -> Result<OutputValue>;
}
