//! Error types for radius analysis cycles.

use std::fmt;

/// Result type for analysis operations
pub type EngineResult<T> = Result<T, AnalysisError>;

/// Remote endpoint an attempt was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Multi-point prediction inside a circle (primary path)
    CirclePrediction,
    /// Single-point prediction (fallback path)
    PointPrediction,
    /// Service liveness probe
    Health,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endpoint::CirclePrediction => "circle-prediction",
            Endpoint::PointPrediction => "point-prediction",
            Endpoint::Health => "health",
        };
        f.write_str(name)
    }
}

/// What went wrong on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Connection refused, DNS failure, reset, ...
    Connect(String),
    /// Server answered with a non-success status
    Status(u16),
    /// Body could not be read or was not JSON
    Body(String),
    /// Transport-level timeout
    Timeout,
}

/// Transport-level failure of a single request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{endpoint} request failed: {kind}")]
pub struct TransportError {
    pub endpoint: Endpoint,
    pub kind: TransportErrorKind,
}

impl TransportError {
    pub fn new(endpoint: Endpoint, kind: TransportErrorKind) -> Self {
        Self { endpoint, kind }
    }

    pub fn status(endpoint: Endpoint, code: u16) -> Self {
        Self::new(endpoint, TransportErrorKind::Status(code))
    }

    pub fn connect(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        Self::new(endpoint, TransportErrorKind::Connect(reason.into()))
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportErrorKind::Connect(reason) => write!(f, "connection error: {}", reason),
            TransportErrorKind::Status(code) => write!(f, "HTTP status {}", code),
            TransportErrorKind::Body(reason) => write!(f, "unreadable body: {}", reason),
            TransportErrorKind::Timeout => f.write_str("timed out"),
        }
    }
}

/// Error type for analysis cycles.
///
/// Every variant is scoped to a single cycle; none of them is fatal to the
/// hosting view, and the user may simply trigger the analysis again.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Bad center/radius/segments. Raised before any network call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] TransportError),

    /// Both the primary and the fallback attempt failed at the transport level.
    #[error("Analysis unavailable (primary: {primary}; fallback: {fallback})")]
    AnalysisUnavailable {
        primary: TransportError,
        fallback: TransportError,
    },

    #[error("Malformed response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: Endpoint, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The map view was torn down; no further cycles can be drawn.
    #[error("Map view has been released")]
    ViewReleased,
}

impl AnalysisError {
    pub fn malformed(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        AnalysisError::MalformedResponse {
            endpoint,
            reason: reason.into(),
        }
    }

    /// Short text shown to the user in place of results.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::InvalidArgument(reason) => format!("Cannot analyze this area: {}", reason),
            AnalysisError::NetworkFailure(_) | AnalysisError::AnalysisUnavailable { .. } => {
                "Prediction service is unavailable. Please try again.".to_string()
            }
            AnalysisError::MalformedResponse { .. } => {
                "Prediction service returned an unexpected response.".to_string()
            }
            AnalysisError::Configuration(reason) => format!("Analysis is misconfigured: {}", reason),
            AnalysisError::ViewReleased => "The map is no longer available.".to_string(),
        }
    }
}
