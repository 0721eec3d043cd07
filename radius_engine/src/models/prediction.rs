//! Prediction results as consumed by the renderer.

use serde::{Deserialize, Serialize};

use super::geo::GeoPoint;

/// Suitability verdict for one evaluated point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionPoint {
    pub lat: f64,
    pub lng: f64,
    pub suitable: bool,
    /// Probability of the "suitable" class, in [0, 1].
    pub confidence: Option<f64>,
    pub place_name: Option<String>,
}

impl PredictionPoint {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Confidence as a whole percentage, e.g. `0.915` -> `92`.
    pub fn confidence_percent(&self) -> Option<u8> {
        self.confidence
            .filter(|c| c.is_finite())
            .map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u8)
    }

    /// The place name, or `None` when absent or blank.
    pub fn label(&self) -> Option<&str> {
        self.place_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Aggregate counts shown in the summary popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub suitable_count: usize,
    pub total_count: usize,
}

impl AnalysisSummary {
    pub fn label(&self) -> String {
        format!("{} suitable / {} points", self.suitable_count, self.total_count)
    }
}

/// Ordered predictions returned for one analysis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub points: Vec<PredictionPoint>,
}

impl AnalysisResult {
    pub fn new(points: Vec<PredictionPoint>) -> Self {
        Self { points }
    }

    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            suitable_count: self.points.iter().filter(|p| p.suitable).count(),
            total_count: self.points.len(),
        }
    }
}
