//! Circle approximation around an analysis center.
//!
//! The ring is computed in a local equirectangular projection using the
//! empirical km-per-degree constants below. The projection degrades towards
//! the poles, so centers beyond [`MAX_ABS_LATITUDE`] are rejected.

use std::f64::consts::PI;

use crate::error::{AnalysisError, EngineResult};
use crate::models::{CirclePolygon, GeoPoint};

/// Kilometres per degree of latitude.
pub const KM_PER_DEG_LAT: f64 = 110.54;
/// Kilometres per degree of longitude at the equator; scaled by cos(lat).
pub const KM_PER_DEG_LNG_EQUATOR: f64 = 111.32;
pub const DEFAULT_SEGMENTS: usize = 64;
pub const MAX_ABS_LATITUDE: f64 = 85.0;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Build a closed ring of `segments + 1` positions approximating a circle of
/// `radius_km` around `center`.
pub fn build_circle(center: &GeoPoint, radius_km: f64, segments: usize) -> EngineResult<CirclePolygon> {
    CircleBuilder::new(segments).build(center, radius_km)
}

/// Circle builder with an explicit segment count and polar cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleBuilder {
    pub segments: usize,
    pub max_abs_latitude: f64,
}

impl Default for CircleBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENTS)
    }
}

impl CircleBuilder {
    pub fn new(segments: usize) -> Self {
        Self {
            segments,
            max_abs_latitude: MAX_ABS_LATITUDE,
        }
    }

    pub fn with_max_abs_latitude(mut self, limit: f64) -> Self {
        self.max_abs_latitude = limit;
        self
    }

    pub fn build(&self, center: &GeoPoint, radius_km: f64) -> EngineResult<CirclePolygon> {
        if self.segments < 3 {
            return Err(AnalysisError::InvalidArgument(format!(
                "a circle needs at least 3 segments, got {}",
                self.segments
            )));
        }
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(AnalysisError::InvalidArgument(format!(
                "radius must be a positive number of kilometres, got {}",
                radius_km
            )));
        }
        center.validate()?;
        if center.lat.abs() > self.max_abs_latitude {
            return Err(AnalysisError::InvalidArgument(format!(
                "latitude {} is too close to the pole (limit ±{})",
                center.lat, self.max_abs_latitude
            )));
        }

        let dist_lng = radius_km / (KM_PER_DEG_LNG_EQUATOR * center.lat.to_radians().cos());
        let dist_lat = radius_km / KM_PER_DEG_LAT;

        let mut ring = Vec::with_capacity(self.segments + 1);
        for i in 0..self.segments {
            let theta = 2.0 * PI * i as f64 / self.segments as f64;
            ring.push([
                center.lng + dist_lng * theta.cos(),
                center.lat + dist_lat * theta.sin(),
            ]);
        }
        ring.push(ring[0]);

        Ok(CirclePolygon { ring })
    }
}

/// Great-circle distance in kilometres.
pub fn haversine_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
#[path = "circle_tests.rs"]
mod circle_tests;
