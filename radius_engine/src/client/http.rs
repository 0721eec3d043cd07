//! reqwest-backed prediction service client.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::ServiceSettings;
use crate::error::{AnalysisError, Endpoint, EngineResult, TransportError, TransportErrorKind};

use super::dto::{CirclePredictionBody, PointPredictionBody, ServiceHealth};
use super::service::PredictionService;

/// HTTP client for the prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictionService {
    client: reqwest::Client,
    settings: ServiceSettings,
}

impl HttpPredictionService {
    /// Build a client for the configured service.
    ///
    /// A request timeout is only applied when `request_timeout_secs` is set.
    pub fn new(settings: ServiceSettings) -> EngineResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AnalysisError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    async fn post_json<B: Serialize + ?Sized + Sync>(
        &self,
        endpoint: Endpoint,
        url: &str,
        body: &B,
    ) -> Result<Value, TransportError> {
        log::debug!("POST {} ({})", url, endpoint);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(endpoint, e))?;

        read_json(endpoint, response).await
    }
}

async fn read_json(endpoint: Endpoint, response: reqwest::Response) -> Result<Value, TransportError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        log::debug!("{} answered {}: {}", endpoint, status, body.trim());
        return Err(TransportError::status(endpoint, status.as_u16()));
    }

    let body = response.text().await.map_err(|e| transport_error(endpoint, e))?;
    serde_json::from_str(&body).map_err(|e| {
        TransportError::new(endpoint, TransportErrorKind::Body(format!("invalid JSON: {}", e)))
    })
}

fn transport_error(endpoint: Endpoint, err: reqwest::Error) -> TransportError {
    let kind = if err.is_timeout() {
        TransportErrorKind::Timeout
    } else if err.is_body() || err.is_decode() {
        TransportErrorKind::Body(err.to_string())
    } else {
        TransportErrorKind::Connect(err.to_string())
    };
    TransportError::new(endpoint, kind)
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn predict_circle(&self, body: &CirclePredictionBody) -> Result<Value, TransportError> {
        let url = self.settings.circle_url();
        self.post_json(Endpoint::CirclePrediction, &url, body).await
    }

    async fn predict_points(&self, body: &[PointPredictionBody]) -> Result<Value, TransportError> {
        let url = self.settings.point_url();
        self.post_json(Endpoint::PointPrediction, &url, body).await
    }

    async fn health_check(&self) -> Result<ServiceHealth, TransportError> {
        let url = self.settings.health_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(Endpoint::Health, e))?;
        let body = read_json(Endpoint::Health, response).await?;

        serde_json::from_value(body).map_err(|e| {
            TransportError::new(
                Endpoint::Health,
                TransportErrorKind::Body(format!("unexpected health payload: {}", e)),
            )
        })
    }
}
