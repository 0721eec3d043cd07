//! Transport to the remote prediction service.
//!
//! - `service`: the [`PredictionService`] trait
//! - `http`: reqwest implementation (feature `http-client`)
//! - `scripted`: queued-reply implementation for tests and offline development
//! - `dto`: request/response wire types and response validation

pub mod dto;
#[cfg(feature = "http-client")]
pub mod http;
pub mod scripted;
pub mod service;

pub use dto::{CirclePredictionBody, PointPredictionBody, PredictionDto, ServiceHealth};
#[cfg(feature = "http-client")]
pub use http::HttpPredictionService;
pub use scripted::{RecordedCall, ScriptedPredictionService, ScriptedReply};
pub use service::PredictionService;
