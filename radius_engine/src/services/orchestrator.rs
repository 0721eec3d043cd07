//! Remote suitability requests with a primary/fallback policy.
//!
//! The policy is an ordered [`AttemptPlan`]: the circle-prediction attempt
//! first, then a single-point attempt at the center. A transport failure moves
//! on to the next attempt; a schema violation ends the analysis immediately.
//! There are no retries beyond the plan.

use std::sync::Arc;

use crate::client::dto::decode_predictions;
use crate::client::{CirclePredictionBody, PointPredictionBody, PredictionService, ServiceHealth};
use crate::error::{AnalysisError, Endpoint, EngineResult, TransportError};
use crate::models::{AnalysisRequest, AnalysisResult};

/// One request the orchestrator may issue.
#[derive(Debug, Clone, PartialEq)]
pub enum Attempt {
    /// Predictions for points spread over the circle.
    Circle(CirclePredictionBody),
    /// Prediction for the center alone.
    Point(Vec<PointPredictionBody>),
}

impl Attempt {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Attempt::Circle(_) => Endpoint::CirclePrediction,
            Attempt::Point(_) => Endpoint::PointPrediction,
        }
    }
}

/// Attempts in the order they are tried.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptPlan {
    attempts: Vec<Attempt>,
}

impl AttemptPlan {
    /// Circle prediction, falling back to a point prediction at the center.
    pub fn for_request(req: &AnalysisRequest) -> Self {
        Self {
            attempts: vec![
                Attempt::Circle(CirclePredictionBody::from(req)),
                Attempt::Point(vec![PointPredictionBody::from(req)]),
            ],
        }
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }
}

/// Issues analysis requests against a [`PredictionService`].
#[derive(Clone)]
pub struct AnalysisOrchestrator {
    service: Arc<dyn PredictionService>,
}

impl AnalysisOrchestrator {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self { service }
    }

    /// Run one analysis.
    ///
    /// # Returns
    /// * `Ok(AnalysisResult)` - predictions from the first attempt that succeeded
    /// * `Err(AnalysisError::InvalidArgument)` - the request was rejected before dispatch
    /// * `Err(AnalysisError::MalformedResponse)` - the service answered with an unexpected shape
    /// * `Err(AnalysisError::AnalysisUnavailable)` - primary and fallback both failed
    pub async fn run_analysis(&self, req: &AnalysisRequest) -> EngineResult<AnalysisResult> {
        req.validate()?;
        let plan = AttemptPlan::for_request(req);

        let mut failures: Vec<TransportError> = Vec::with_capacity(plan.attempts().len());
        for attempt in plan.attempts() {
            match self.execute(attempt).await {
                Ok(body) => return self.normalize(req, attempt, body),
                Err(err) => {
                    log::warn!("{} attempt failed: {}", attempt.endpoint(), err);
                    failures.push(err);
                }
            }
        }

        let mut failures = failures.into_iter();
        let err = match (failures.next(), failures.next()) {
            (Some(primary), Some(fallback)) => AnalysisError::AnalysisUnavailable { primary, fallback },
            (Some(only), None) => AnalysisError::NetworkFailure(only),
            (None, _) => AnalysisError::InvalidArgument("empty attempt plan".to_string()),
        };
        log::error!("analysis at ({}, {}) failed: {}", req.center.lat, req.center.lng, err);
        Err(err)
    }

    pub async fn health_check(&self) -> Result<ServiceHealth, TransportError> {
        self.service.health_check().await
    }

    async fn execute(&self, attempt: &Attempt) -> Result<serde_json::Value, TransportError> {
        log::debug!("dispatching {} request", attempt.endpoint());
        match attempt {
            Attempt::Circle(body) => self.service.predict_circle(body).await,
            Attempt::Point(body) => self.service.predict_points(body).await,
        }
    }

    fn normalize(
        &self,
        req: &AnalysisRequest,
        attempt: &Attempt,
        body: serde_json::Value,
    ) -> EngineResult<AnalysisResult> {
        match attempt {
            Attempt::Circle(_) => {
                let points = decode_predictions(Endpoint::CirclePrediction, body, false)?;
                Ok(AnalysisResult::new(points))
            }
            Attempt::Point(_) => {
                let points = decode_predictions(Endpoint::PointPrediction, body, true)?;
                // Degraded result: the center only.
                let mut center = points.into_iter().next().ok_or_else(|| {
                    AnalysisError::malformed(Endpoint::PointPrediction, "expected at least one prediction")
                })?;
                if center.label().is_none() {
                    center.place_name = req.center.name.clone();
                }
                Ok(AnalysisResult::new(vec![center]))
            }
        }
    }
}
