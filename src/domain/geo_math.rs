use super::Coordinate;

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance in meters.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    central_angle(a, b) * EARTH_RADIUS_M
}

/// Great-circle distance in kilometers, used for session relocation checks.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    central_angle(a, b) * EARTH_RADIUS_KM
}

fn central_angle(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = (b.lat() - a.lat()).to_radians();
    let dlng = (b.lng() - a.lng()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push h marginally past 1.0 for antipodal points.
    let h = h.clamp(0.0, 1.0);

    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}
