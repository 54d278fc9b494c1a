//! Geographic (latitude/longitude) to Cartesian conversions.
//!
//! Angles are in degrees. Latitude is measured from the equator, longitude
//! from the prime meridian, and the z axis points through the north pole.

use nexus_model::Cartesian;

pub use nexus_model::options::DEFAULT_EARTH_RADIUS_KM as EARTH_RADIUS_KM;

/// Converts latitude/longitude on a sphere of `radius` to `(x, y, z)`.
pub fn latlon_to_cartesian(lat: f64, lon: f64, radius: f64) -> Cartesian {
    let lat_rad = lat.to_radians();
    let lon_rad = lon.to_radians();

    Cartesian {
        x: radius * lat_rad.cos() * lon_rad.cos(),
        y: radius * lat_rad.cos() * lon_rad.sin(),
        z: radius * lat_rad.sin(),
    }
}

/// [`latlon_to_cartesian`] at the mean Earth radius.
pub fn latlon_to_earth_cartesian(lat: f64, lon: f64) -> Cartesian {
    latlon_to_cartesian(lat, lon, EARTH_RADIUS_KM)
}

/// Recovers `(lat, lon)` in degrees from a Cartesian vector of any length.
///
/// Longitude comes back in `(-180, 180]`. At the poles x and y are
/// (nearly) zero and the longitude is whatever `atan2` makes of them; it
/// carries no information. The zero vector maps to `(0.0, 0.0)`.
pub fn cartesian_to_latlon(x: f64, y: f64, z: f64) -> (f64, f64) {
    let radius = (x * x + y * y + z * z).sqrt();
    if radius == 0.0 {
        return (0.0, 0.0);
    }
    // Rounding can push |z / r| a hair past 1 at the poles.
    let lat = (z / radius).clamp(-1.0, 1.0).asin().to_degrees();
    let lon = y.atan2(x).to_degrees();
    (lat, lon)
}
