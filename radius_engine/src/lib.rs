//! # Radius Analysis Engine
//!
//! Site-suitability analysis around a chosen point, drawn on an interactive map.
//!
//! Given a center and a radius, the engine draws a circle on the map, asks a
//! remote prediction service which points inside it are suitable for a store,
//! and annotates the map with one marker per evaluated point plus a summary.
//! The map runtime itself is external: the engine drives it through the
//! [`overlay::MapView`] trait.
//!
//! ## Architecture
//!
//! - [`models`]: points, circle rings, requests and prediction results
//! - [`services`]: circle construction, request orchestration, rendering and
//!   the per-view analysis session
//! - [`overlay`]: the map-view seam and the manager that owns every drawn element
//! - [`client`]: transport to the prediction service (HTTP and scripted)
//! - [`config`]: TOML configuration with environment overrides
//! - [`error`]: the error taxonomy shared by all of the above
//!
//! ## Example
//!
//! ```no_run
//! use radius_engine::config::EngineConfig;
//! use radius_engine::models::{GeoPoint, Theme};
//! use radius_engine::overlay::RecordingMapView;
//! use radius_engine::services::AnalysisSession;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::from_default_location()?.with_env_overrides()?;
//!     let session = AnalysisSession::connect(config, RecordingMapView::new(), Theme::Light)?;
//!
//!     let outcome = session.analyze(GeoPoint::new(20.2961, 85.8245), 5.0).await?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod overlay;
pub mod services;

pub use error::{AnalysisError, EngineResult};
