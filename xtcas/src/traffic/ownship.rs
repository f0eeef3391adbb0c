//! Own-ship state.

use crate::geo::GeoPos3;

/// Own aircraft position plus radar altitude.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OwnshipState {
    /// Latitude/longitude and indicated altitude.
    pub position: GeoPos3,
    /// Height above ground from the radio altimeter.
    pub agl: f64,
}

impl OwnshipState {
    pub fn new(position: GeoPos3, agl: f64) -> Self {
        Self { position, agl }
    }
}
