use super::domain::GeoPoint;

/// Violations raised while validating a capture's location evidence.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptureViolation {
    #[error("capture taken {found_m:.1} m from the registered site (limit {max_m:.1} m)")]
    OutsideGeofence { max_m: f64, found_m: f64 },
    #[error("capture is missing location data for a geofenced site")]
    MissingLocation,
}

const DEFAULT_GEOFENCE_RADIUS_M: f64 = 25.0;
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Policy dial bounding how far a capture may sit from its registered site.
#[derive(Debug, Clone, Copy)]
pub struct CapturePolicy {
    geofence_radius_m: f64,
}

impl CapturePolicy {
    pub fn new(geofence_radius_m: f64) -> Self {
        let sanitized = if geofence_radius_m.is_finite() && geofence_radius_m > 0.0 {
            geofence_radius_m
        } else {
            DEFAULT_GEOFENCE_RADIUS_M
        };

        Self {
            geofence_radius_m: sanitized,
        }
    }

    pub fn geofence_radius_m(&self) -> f64 {
        self.geofence_radius_m
    }

    pub fn verify(&self, site: GeoPoint, capture: GeoPoint) -> Result<(), CaptureViolation> {
        let found_m = haversine_distance_m(site, capture);
        if found_m > self.geofence_radius_m {
            return Err(CaptureViolation::OutsideGeofence {
                max_m: self.geofence_radius_m,
                found_m,
            });
        }
        Ok(())
    }
}

impl Default for CapturePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_GEOFENCE_RADIUS_M)
    }
}

/// Great-circle distance between two coordinates in meters.
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
