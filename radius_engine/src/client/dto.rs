//! Wire types exchanged with the prediction service.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AnalysisError, Endpoint, EngineResult};
use crate::models::{AnalysisRequest, PredictionPoint};

/// Body of `POST /predict-circle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CirclePredictionBody {
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometres.
    pub radius: f64,
    pub fclass: String,
}

/// One element of the `POST /predict` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPredictionBody {
    pub latitude: f64,
    pub longitude: f64,
    pub fclass: String,
}

impl From<&AnalysisRequest> for CirclePredictionBody {
    fn from(req: &AnalysisRequest) -> Self {
        Self {
            latitude: req.center.lat,
            longitude: req.center.lng,
            radius: req.radius_km,
            fclass: req.land_class.clone(),
        }
    }
}

impl From<&AnalysisRequest> for PointPredictionBody {
    fn from(req: &AnalysisRequest) -> Self {
        Self {
            latitude: req.center.lat,
            longitude: req.center.lng,
            fclass: req.land_class.clone(),
        }
    }
}

/// One element of a prediction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionDto {
    pub latitude: f64,
    pub longitude: f64,
    pub suitable: bool,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub place_name: Option<String>,
}

impl From<PredictionDto> for PredictionPoint {
    fn from(dto: PredictionDto) -> Self {
        PredictionPoint {
            lat: dto.latitude,
            lng: dto.longitude,
            suitable: dto.suitable,
            confidence: dto.confidence,
            place_name: dto.place_name,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

/// Decode and check a prediction array.
///
/// The body must be an array of objects carrying at least `latitude`,
/// `longitude` and `suitable`; `require_non_empty` additionally rejects `[]`.
pub fn decode_predictions(
    endpoint: Endpoint,
    body: Value,
    require_non_empty: bool,
) -> EngineResult<Vec<PredictionPoint>> {
    let len = match &body {
        Value::Array(items) => items.len(),
        other => {
            return Err(AnalysisError::malformed(
                endpoint,
                format!("expected a JSON array, got {}", json_kind(other)),
            ))
        }
    };
    if require_non_empty && len == 0 {
        return Err(AnalysisError::malformed(endpoint, "expected at least one prediction"));
    }

    let dtos: Vec<PredictionDto> = serde_path_to_error::deserialize(body)
        .map_err(|e| AnalysisError::malformed(endpoint, format!("at {}: {}", e.path(), e.inner())))?;

    for (i, dto) in dtos.iter().enumerate() {
        if !dto.latitude.is_finite() || !dto.longitude.is_finite() {
            return Err(AnalysisError::malformed(
                endpoint,
                format!("[{}]: non-finite coordinates", i),
            ));
        }
        if let Some(confidence) = dto.confidence {
            if !(0.0..=1.0).contains(&confidence) {
                return Err(AnalysisError::malformed(
                    endpoint,
                    format!("[{}].confidence: {} is outside [0, 1]", i, confidence),
                ));
            }
        }
    }

    Ok(dtos.into_iter().map(PredictionPoint::from).collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
