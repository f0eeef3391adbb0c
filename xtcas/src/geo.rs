//! Position primitives shared by the traffic interface.
//!
//! - [`GeoPos3`] - geodetic latitude/longitude/elevation triple
//! - [`LocalVector`] - host-local Cartesian triple (X-Plane OpenGL frame)

use std::fmt;

/// Mean earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Geodetic position.
///
/// Latitude and longitude are decimal degrees. Elevation is carried in
/// whatever unit the host delivers it; the registry never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeoPos3 {
    /// Latitude in degrees (-90 to 90).
    pub lat: f64,
    /// Longitude in degrees (-180 to 180).
    pub lon: f64,
    /// Elevation.
    pub elev: f64,
}

impl GeoPos3 {
    /// Create a new geodetic position.
    pub const fn new(lat: f64, lon: f64, elev: f64) -> Self {
        Self { lat, lon, elev }
    }

    /// Great-circle distance to `other` in nautical miles (haversine).
    pub fn distance_nm(&self, other: &GeoPos3) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        EARTH_RADIUS_NM * 2.0 * a.sqrt().asin()
    }
}

impl fmt::Display for GeoPos3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5} @ {:.0}", self.lat, self.lon, self.elev)
    }
}

/// Host-local Cartesian coordinates in meters.
///
/// X-Plane's local frame: +x east, +y up, +z south, origin at the
/// current scenery reference point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocalVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LocalVector {
    /// The all-zero vector, used by the host for "slot unoccupied".
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns true if every component is exactly zero.
    ///
    /// A real aircraft sitting exactly on the local origin would also
    /// match. That is treated as impossible in practice.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sentinel() {
        assert!(LocalVector::ZERO.is_zero());
        assert!(LocalVector::new(-0.0, 0.0, -0.0).is_zero());
    }

    #[test]
    fn test_single_nonzero_axis_is_occupied() {
        assert!(!LocalVector::new(0.0, 0.0, 1e-9).is_zero());
        assert!(!LocalVector::new(0.0, -3.0, 0.0).is_zero());
    }

    #[test]
    fn test_distance_one_degree_latitude() {
        let from = GeoPos3::new(0.0, 0.0, 0.0);
        let to = GeoPos3::new(1.0, 0.0, 0.0);
        assert!((from.distance_nm(&to) - 60.0).abs() < 0.5);
    }

    #[test]
    fn test_distance_ignores_elevation() {
        let from = GeoPos3::new(53.0, 9.0, 0.0);
        let to = GeoPos3::new(53.0, 9.0, 35000.0);
        assert_eq!(from.distance_nm(&to), 0.0);
    }

    #[test]
    fn test_geo_display() {
        let pos = GeoPos3::new(53.630278, 9.988333, 1000.0);
        assert_eq!(pos.to_string(), "53.63028, 9.98833 @ 1000");
    }
}
