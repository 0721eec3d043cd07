//! Engine configuration file support.
//!
//! This module provides utilities for reading the prediction service location,
//! circle geometry settings and overlay palette from TOML configuration files,
//! with a small set of environment overrides for deployments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{AnalysisError, EngineResult};
use crate::models::{GeoPoint, Theme};
use crate::overlay::style::{CircleStyle, MarkerPalette};

/// Engine configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub circle: CircleSettings,
    #[serde(default)]
    pub style: StyleSettings,
    #[serde(default)]
    pub default_center: CenterSettings,
}

/// Remote prediction service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_circle_path")]
    pub circle_path: String,
    #[serde(default = "default_point_path")]
    pub point_path: String,
    #[serde(default = "default_health_path")]
    pub health_path: String,
    #[serde(default = "default_land_class")]
    pub land_class: String,
    /// Unset means the transport's own behaviour applies.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Circle geometry and camera settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircleSettings {
    #[serde(default = "default_segments")]
    pub segments: usize,
    #[serde(default = "default_max_abs_latitude")]
    pub max_abs_latitude: f64,
    #[serde(default = "default_zoom")]
    pub default_zoom: f64,
}

/// Overlay colours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSettings {
    #[serde(default = "default_suitable_color")]
    pub suitable_color: String,
    #[serde(default = "default_unsuitable_color")]
    pub unsuitable_color: String,
    #[serde(default = "default_halo_color")]
    pub halo_color: String,
    #[serde(default = "default_light_circle_color")]
    pub light_circle_color: String,
    #[serde(default = "default_dark_circle_color")]
    pub dark_circle_color: String,
    #[serde(default = "default_circle_opacity")]
    pub circle_opacity: f64,
}

/// Center used when the search collaborator has not supplied one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterSettings {
    #[serde(default = "default_center_lat")]
    pub lat: f64,
    #[serde(default = "default_center_lng")]
    pub lng: f64,
    #[serde(default = "default_center_name")]
    pub name: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_circle_path() -> String {
    "/predict-circle".to_string()
}

fn default_point_path() -> String {
    "/predict".to_string()
}

fn default_health_path() -> String {
    "/health".to_string()
}

fn default_land_class() -> String {
    "open_land".to_string()
}

fn default_segments() -> usize {
    64
}

fn default_max_abs_latitude() -> f64 {
    85.0
}

fn default_zoom() -> f64 {
    12.0
}

fn default_suitable_color() -> String {
    "#22c55e".to_string()
}

fn default_unsuitable_color() -> String {
    "#ef4444".to_string()
}

fn default_halo_color() -> String {
    "#ffffff".to_string()
}

fn default_light_circle_color() -> String {
    "#3b82f6".to_string()
}

fn default_dark_circle_color() -> String {
    "#60a5fa".to_string()
}

fn default_circle_opacity() -> f64 {
    0.2
}

fn default_center_lat() -> f64 {
    20.2961
}

fn default_center_lng() -> f64 {
    85.8245
}

fn default_center_name() -> String {
    "Bhubaneswar".to_string()
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            circle_path: default_circle_path(),
            point_path: default_point_path(),
            health_path: default_health_path(),
            land_class: default_land_class(),
            request_timeout_secs: None,
        }
    }
}

impl Default for CircleSettings {
    fn default() -> Self {
        Self {
            segments: default_segments(),
            max_abs_latitude: default_max_abs_latitude(),
            default_zoom: default_zoom(),
        }
    }
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            suitable_color: default_suitable_color(),
            unsuitable_color: default_unsuitable_color(),
            halo_color: default_halo_color(),
            light_circle_color: default_light_circle_color(),
            dark_circle_color: default_dark_circle_color(),
            circle_opacity: default_circle_opacity(),
        }
    }
}

impl Default for CenterSettings {
    fn default() -> Self {
        Self {
            lat: default_center_lat(),
            lng: default_center_lng(),
            name: default_center_name(),
        }
    }
}

impl ServiceSettings {
    pub fn circle_url(&self) -> String {
        join_url(&self.base_url, &self.circle_path)
    }

    pub fn point_url(&self) -> String {
        join_url(&self.base_url, &self.point_path)
    }

    pub fn health_url(&self) -> String {
        join_url(&self.base_url, &self.health_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl StyleSettings {
    pub fn marker_palette(&self) -> MarkerPalette {
        MarkerPalette {
            suitable: self.suitable_color.clone(),
            unsuitable: self.unsuitable_color.clone(),
            halo: self.halo_color.clone(),
        }
    }

    pub fn circle_style(&self, theme: Theme) -> CircleStyle {
        let color = match theme {
            Theme::Light => &self.light_circle_color,
            Theme::Dark => &self.dark_circle_color,
        };
        CircleStyle {
            fill_color: color.clone(),
            fill_opacity: self.circle_opacity,
            outline_color: color.clone(),
        }
    }
}

impl EngineConfig {
    /// Load engine configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if successful
    /// * `Err(AnalysisError::Configuration)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AnalysisError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(content).map_err(|e| {
            AnalysisError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load engine configuration from the default location.
    ///
    /// Searches for `radius.toml` in:
    /// 1. Current directory
    /// 2. `radius_engine/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> EngineResult<Self> {
        let search_paths = [
            PathBuf::from("radius.toml"),
            PathBuf::from("radius_engine/radius.toml"),
            PathBuf::from("../radius.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(AnalysisError::Configuration(
            "No radius.toml found in standard locations".to_string(),
        ))
    }

    /// Apply `RADIUS_SERVICE_URL`, `RADIUS_LAND_CLASS` and
    /// `RADIUS_REQUEST_TIMEOUT_SECS` on top of the loaded values.
    pub fn with_env_overrides(mut self) -> EngineResult<Self> {
        if let Ok(url) = std::env::var("RADIUS_SERVICE_URL") {
            self.service.base_url = url;
        }
        if let Ok(land_class) = std::env::var("RADIUS_LAND_CLASS") {
            self.service.land_class = land_class;
        }
        if let Ok(raw) = std::env::var("RADIUS_REQUEST_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                AnalysisError::Configuration(format!(
                    "RADIUS_REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?;
            self.service.request_timeout_secs = Some(secs);
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.service.base_url.trim().is_empty() {
            return Err(AnalysisError::Configuration(
                "'service.base_url' must not be empty".to_string(),
            ));
        }
        if self.service.land_class.trim().is_empty() {
            return Err(AnalysisError::Configuration(
                "'service.land_class' must not be empty".to_string(),
            ));
        }
        if self.circle.segments < 3 {
            return Err(AnalysisError::Configuration(format!(
                "'circle.segments' must be at least 3, got {}",
                self.circle.segments
            )));
        }
        let limit = self.circle.max_abs_latitude;
        if !(limit > 0.0 && limit < 90.0) {
            return Err(AnalysisError::Configuration(format!(
                "'circle.max_abs_latitude' must be inside (0, 90), got {}",
                limit
            )));
        }
        Ok(())
    }

    pub fn default_center(&self) -> GeoPoint {
        GeoPoint::named(
            self.default_center.lat,
            self.default_center.lng,
            self.default_center.name.clone(),
        )
    }

    /// The searched location if there is one, otherwise the configured default.
    pub fn center_for(&self, searched: Option<&GeoPoint>) -> GeoPoint {
        searched.cloned().unwrap_or_else(|| self.default_center())
    }
}
