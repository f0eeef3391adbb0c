//! Coordinate transform collaborator.
//!
//! The host simulator owns the mapping from its local Cartesian frame to
//! geodetic coordinates. The traffic interface only consumes it through
//! [`CoordinateTransform`].
//!
//! [`LocalTangentPlane`] is a flat-earth stand-in used when no host is
//! attached (simulation, tests).

mod tangent_plane;

pub use tangent_plane::{LocalTangentPlane, EARTH_RADIUS_M};

use crate::geo::{GeoPos3, LocalVector};

/// Converts host-local coordinates into a geodetic position.
///
/// Implementations must be pure and synchronous. `None` means the
/// transform is unavailable this frame.
pub trait CoordinateTransform: Send + Sync {
    /// Convert a local `(x, y, z)` triple to `(lat, lon, elev)`.
    fn local_to_world(&self, local: LocalVector) -> Option<GeoPos3>;
}

impl<F> CoordinateTransform for F
where
    F: Fn(LocalVector) -> Option<GeoPos3> + Send + Sync,
{
    fn local_to_world(&self, local: LocalVector) -> Option<GeoPos3> {
        self(local)
    }
}
