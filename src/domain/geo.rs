use serde::{Deserialize, Serialize};

/// Earth radius in metres used by `distance`.
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

/// A point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance(*self, *other)
    }
}

fn hsin(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}

/// Great-circle distance in metres (haversine).
pub fn distance(from: Coordinate, to: Coordinate) -> f64 {
    let la1 = from.lat.to_radians();
    let lo1 = from.lon.to_radians();
    let la2 = to.lat.to_radians();
    let lo2 = to.lon.to_radians();
    let h = hsin(la2 - la1) + la1.cos() * la2.cos() * hsin(lo2 - lo1);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
