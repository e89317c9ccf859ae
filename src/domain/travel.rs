use serde::{Deserialize, Serialize};

use crate::config::TravelSettings;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Estimated road trip from the home hall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelEstimate {
    pub distance_km: f64,
    pub road_distance_km: f64,
    pub minutes: u32,
}

/// Great-circle distance in kilometres
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Crow-flies distance times a detour factor, driven at an average speed, never under the floor
pub fn estimate_travel(home: GeoPoint, destination: GeoPoint, settings: &TravelSettings) -> TravelEstimate {
    let distance_km = haversine_km(home, destination);
    let road_distance_km = distance_km * settings.detour_factor;
    let driven = (road_distance_km / settings.average_speed_kmh * 60.0).round();
    let minutes = (driven as u32).max(settings.minimum_minutes);

    TravelEstimate {
        distance_km,
        road_distance_km,
        minutes,
    }
}
