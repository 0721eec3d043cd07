//! Geographic value types: points, circle rings and analysis requests.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AnalysisError, EngineResult};

/// A WGS84 position, optionally labelled (e.g. by the geocoder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, name: None }
    }

    pub fn named(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: Some(name.into()),
        }
    }

    /// Reject non-finite or out-of-range coordinates.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(AnalysisError::InvalidArgument(format!(
                "latitude {} is outside [-90, 90]",
                self.lat
            )));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(AnalysisError::InvalidArgument(format!(
                "longitude {} is outside [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// `[lng, lat]` as used by GeoJSON.
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// Closed ring approximating a circle. First and last positions are equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePolygon {
    /// `[lng, lat]` pairs in ring order.
    pub ring: Vec<[f64; 2]>,
}

impl CirclePolygon {
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.ring.first(), self.ring.last()) {
            (Some(first), Some(last)) => self.ring.len() > 1 && first == last,
            _ => false,
        }
    }

    pub fn points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.ring.iter().map(|[lng, lat]| GeoPoint::new(*lat, *lng))
    }

    /// GeoJSON `Feature` with a single-ring `Polygon` geometry.
    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "Feature",
            "properties": {},
            "geometry": {
                "type": "Polygon",
                "coordinates": [self.ring],
            }
        })
    }
}

/// One user-triggered analysis: where, how far, and which land class.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub land_class: String,
}

impl AnalysisRequest {
    pub fn new(center: GeoPoint, radius_km: f64, land_class: impl Into<String>) -> Self {
        Self {
            center,
            radius_km,
            land_class: land_class.into(),
        }
    }

    /// Checked before anything is drawn or dispatched.
    pub fn validate(&self) -> EngineResult<()> {
        self.center.validate()?;
        if !self.radius_km.is_finite() || self.radius_km <= 0.0 {
            return Err(AnalysisError::InvalidArgument(format!(
                "radius must be a positive number of kilometres, got {}",
                self.radius_km
            )));
        }
        if self.land_class.trim().is_empty() {
            return Err(AnalysisError::InvalidArgument(
                "land class must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
