//! Great-circle distance.

use crate::domain::Coordinates;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres.
///
/// # Examples
///
/// ```
/// use layover_server::domain::Coordinates;
/// use layover_server::validator::haversine_km;
///
/// let london = Coordinates::new(51.5074, -0.1278).unwrap();
/// let paris = Coordinates::new(48.8566, 2.3522).unwrap();
/// let d = haversine_km(london, paris);
/// assert!((d - 343.5).abs() < 1.0);
/// ```
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}
