//! Scripted prediction service.
//!
//! Replies are queued per endpoint and handed out in order; every call is
//! recorded so tests can assert which endpoints were hit and with what body.
//! An endpoint with an empty queue fails with a connection error.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Endpoint, TransportError, TransportErrorKind};

use super::dto::{CirclePredictionBody, PointPredictionBody, ServiceHealth};
use super::service::PredictionService;

/// A queued reply, optionally delayed.
#[derive(Debug, Clone)]
pub struct ScriptedReply {
    pub result: Result<Value, TransportErrorKind>,
    pub delay: Option<Duration>,
}

impl ScriptedReply {
    pub fn ok(body: Value) -> Self {
        Self {
            result: Ok(body),
            delay: None,
        }
    }

    pub fn fail(kind: TransportErrorKind) -> Self {
        Self {
            result: Err(kind),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A call the service received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub endpoint: Endpoint,
    pub body: Value,
}

#[derive(Default)]
struct ScriptData {
    replies: HashMap<Endpoint, VecDeque<ScriptedReply>>,
    calls: Vec<RecordedCall>,
}

/// In-memory [`PredictionService`] driven by queued replies.
#[derive(Clone, Default)]
pub struct ScriptedPredictionService {
    data: Arc<Mutex<ScriptData>>,
}

impl ScriptedPredictionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for `endpoint`.
    pub fn push(&self, endpoint: Endpoint, reply: ScriptedReply) -> &Self {
        self.data
            .lock()
            .replies
            .entry(endpoint)
            .or_default()
            .push_back(reply);
        self
    }

    pub fn push_ok(&self, endpoint: Endpoint, body: Value) -> &Self {
        self.push(endpoint, ScriptedReply::ok(body))
    }

    pub fn push_fail(&self, endpoint: Endpoint, kind: TransportErrorKind) -> &Self {
        self.push(endpoint, ScriptedReply::fail(kind))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.data.lock().calls.clone()
    }

    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.data
            .lock()
            .calls
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .count()
    }

    async fn respond(&self, endpoint: Endpoint, body: Value) -> Result<Value, TransportError> {
        let reply = {
            let mut data = self.data.lock();
            data.calls.push(RecordedCall { endpoint, body });
            data.replies.get_mut(&endpoint).and_then(VecDeque::pop_front)
        };

        let Some(reply) = reply else {
            return Err(TransportError::connect(endpoint, "no scripted reply"));
        };
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        reply.result.map_err(|kind| TransportError::new(endpoint, kind))
    }
}

fn to_value<T: serde::Serialize + ?Sized>(endpoint: Endpoint, body: &T) -> Result<Value, TransportError> {
    serde_json::to_value(body)
        .map_err(|e| TransportError::new(endpoint, TransportErrorKind::Body(e.to_string())))
}

#[async_trait]
impl PredictionService for ScriptedPredictionService {
    async fn predict_circle(&self, body: &CirclePredictionBody) -> Result<Value, TransportError> {
        let body = to_value(Endpoint::CirclePrediction, body)?;
        self.respond(Endpoint::CirclePrediction, body).await
    }

    async fn predict_points(&self, body: &[PointPredictionBody]) -> Result<Value, TransportError> {
        let body = to_value(Endpoint::PointPrediction, body)?;
        self.respond(Endpoint::PointPrediction, body).await
    }

    async fn health_check(&self) -> Result<ServiceHealth, TransportError> {
        let body = self.respond(Endpoint::Health, Value::Null).await?;
        serde_json::from_value(body)
            .map_err(|e| TransportError::new(Endpoint::Health, TransportErrorKind::Body(e.to_string())))
    }
}
