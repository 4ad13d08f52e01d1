//! Great-circle distance between two lat/lon pairs.

pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Reported positions inside this band are indistinguishable from being at
/// the session location, so they collapse to zero before the radius check.
pub const GPS_NOISE_FLOOR_M: f64 = 10.0;

/// Haversine distance in meters. Inputs are degrees and are taken as-is;
/// out-of-range coordinates are the caller's problem (kept compatible with
/// the data already in the store).
pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Applies the noise floor: anything under [`GPS_NOISE_FLOOR_M`] counts as 0.
pub fn effective_distance_m(raw: f64) -> f64 {
    if raw < GPS_NOISE_FLOOR_M { 0.0 } else { raw }
}
