use std::fmt;

use super::InputPort;
use crate::error::{Result, RgbdError};
use crate::geometry::GeometryQuery;

/// Snapshot handed to every output computation.
///
/// Owned by the host; the sensors only read from it.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    time: f64,
    geometry_query: Option<&'a dyn GeometryQuery>,
}

impl<'a> Context<'a> {
    /// Context at `time` with the geometry query input left unconnected
    pub fn new(time: f64) -> Self {
        Self {
            time,
            geometry_query: None,
        }
    }

    pub fn with_geometry_query(mut self, query: &'a dyn GeometryQuery) -> Self {
        self.geometry_query = Some(query);
        self
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn has_geometry_query(&self) -> bool {
        self.geometry_query.is_some()
    }

    /// The connected geometry query, or an error if the input is unconnected
    pub fn geometry_query(&self) -> Result<&'a dyn GeometryQuery> {
        self.geometry_query
            .ok_or(RgbdError::InputNotConnected(InputPort::GeometryQuery.name()))
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("time", &self.time)
            .field("geometry_query_connected", &self.has_geometry_query())
            .finish()
    }
}
