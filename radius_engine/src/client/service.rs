//! Prediction service trait for abstracting the remote analysis API.
//!
//! Implementations return the decoded JSON body untouched; schema checks are
//! the orchestrator's job so every transport is validated the same way.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;

use super::dto::{CirclePredictionBody, PointPredictionBody, ServiceHealth};

/// Transport to the remote prediction service.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single client can serve
/// overlapping analysis cycles.
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// `POST` a circle request to the circle-prediction endpoint.
    ///
    /// # Returns
    /// * `Ok(Value)` - decoded JSON body of a success response
    /// * `Err(TransportError)` - connection failure, non-success status or unreadable body
    async fn predict_circle(&self, body: &CirclePredictionBody) -> Result<Value, TransportError>;

    /// `POST` a list of points to the point-prediction endpoint.
    async fn predict_points(&self, body: &[PointPredictionBody]) -> Result<Value, TransportError>;

    /// Liveness and model status of the service.
    async fn health_check(&self) -> Result<ServiceHealth, TransportError>;
}
