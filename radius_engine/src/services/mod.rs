//! Analysis services.
//!
//! - `circle`: circle ring construction and great-circle distance
//! - `orchestrator`: remote requests with the primary/fallback attempt plan
//! - `renderer`: results and errors onto the overlay
//! - `session`: full analysis cycles for one map view

pub mod circle;
pub mod orchestrator;
pub mod renderer;
pub mod session;

pub use circle::{build_circle, haversine_km, CircleBuilder};
pub use orchestrator::{AnalysisOrchestrator, Attempt, AttemptPlan};
pub use renderer::ResultRenderer;
pub use session::{AnalysisSession, CycleOutcome, CycleState};
