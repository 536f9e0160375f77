//! Minimal dataflow host pieces the sensors are built on: evaluation
//! context, named ports and the periodic sample-and-hold stage

mod context;
mod hold;
mod ports;

pub use context::Context;
pub use hold::ZeroOrderHold;
pub use ports::{InputPort, OutputPort, OutputValue, SensorSystem};
