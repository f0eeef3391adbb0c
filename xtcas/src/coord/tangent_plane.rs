//! Flat-earth local tangent plane projection.

use super::CoordinateTransform;
use crate::geo::{GeoPos3, LocalVector};

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Smallest cosine used for longitude scaling, keeps the projection finite near the poles.
const MIN_LON_SCALE: f64 = 0.01;

/// Flat-earth projection around a fixed reference point.
///
/// Follows X-Plane's local axes (+x east, +y up, +z south). Accurate to a
/// few meters within TCAS surveillance range (~40nm) of the reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTangentPlane {
    reference: GeoPos3,
}

impl LocalTangentPlane {
    /// Create a projection anchored at `reference` (the local origin).
    pub fn new(reference: GeoPos3) -> Self {
        Self { reference }
    }

    /// The geodetic position of the local origin.
    pub fn reference(&self) -> GeoPos3 {
        self.reference
    }

    fn lon_scale(&self) -> f64 {
        self.reference.lat.to_radians().cos().max(MIN_LON_SCALE)
    }

    /// Project a geodetic position back into the local frame.
    pub fn world_to_local(&self, pos: GeoPos3) -> LocalVector {
        let north = (pos.lat - self.reference.lat).to_radians() * EARTH_RADIUS_M;
        let east = (pos.lon - self.reference.lon).to_radians() * EARTH_RADIUS_M * self.lon_scale();
        LocalVector::new(east, pos.elev - self.reference.elev, -north)
    }
}

impl CoordinateTransform for LocalTangentPlane {
    fn local_to_world(&self, local: LocalVector) -> Option<GeoPos3> {
        let lat = self.reference.lat + (-local.z / EARTH_RADIUS_M).to_degrees();
        let lon = self.reference.lon + (local.x / (EARTH_RADIUS_M * self.lon_scale())).to_degrees();
        Some(GeoPos3::new(lat, lon, self.reference.elev + local.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HAMBURG: GeoPos3 = GeoPos3::new(53.630278, 9.988333, 16.0);

    #[test]
    fn test_origin_maps_to_reference() {
        let plane = LocalTangentPlane::new(HAMBURG);
        let pos = plane.local_to_world(LocalVector::ZERO).unwrap();
        assert_eq!(pos, HAMBURG);
    }

    #[test]
    fn test_axes_follow_xplane_convention() {
        let plane = LocalTangentPlane::new(HAMBURG);

        // -z is north
        let north = plane.local_to_world(LocalVector::new(0.0, 0.0, -1000.0)).unwrap();
        assert!(north.lat > HAMBURG.lat);
        assert!((north.lon - HAMBURG.lon).abs() < 1e-12);

        // +x is east
        let east = plane.local_to_world(LocalVector::new(1000.0, 0.0, 0.0)).unwrap();
        assert!(east.lon > HAMBURG.lon);

        // +y is up
        let up = plane.local_to_world(LocalVector::new(0.0, 300.0, 0.0)).unwrap();
        assert!((up.elev - 316.0).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let plane = LocalTangentPlane::new(GeoPos3::new(0.0, 0.0, 0.0));
        let meters_per_degree = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        let pos = plane
            .local_to_world(LocalVector::new(0.0, 0.0, -meters_per_degree))
            .unwrap();
        assert!((pos.lat - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_projection() {
        let plane = LocalTangentPlane::new(HAMBURG);
        let target = GeoPos3::new(53.7, 10.1, 2500.0);
        let local = plane.world_to_local(target);
        let back = plane.local_to_world(local).unwrap();

        assert!((back.lat - target.lat).abs() < 1e-9);
        assert!((back.lon - target.lon).abs() < 1e-9);
        assert!((back.elev - target.elev).abs() < 1e-9);
    }

    #[test]
    fn test_closure_as_transform() {
        let fixed = |_: LocalVector| Some(GeoPos3::new(1.0, 2.0, 3.0));
        assert_eq!(
            fixed.local_to_world(LocalVector::new(5.0, 5.0, 5.0)),
            Some(GeoPos3::new(1.0, 2.0, 3.0))
        );
    }
}
