//! Domain value types shared by every stage of an analysis cycle.

pub mod geo;
pub mod identity;
pub mod prediction;

pub use geo::{AnalysisRequest, CirclePolygon, GeoPoint};
pub use identity::{Theme, UserIdentity};
pub use prediction::{AnalysisResult, AnalysisSummary, PredictionPoint};
