//! Ownership of everything an analysis draws on one map view.
//!
//! At most one analysis's visuals are on the map at any time: one circle, the
//! markers of the latest result, and one summary popup. Every element is
//! tracked by the handle the view returned when it was created.

use crate::models::{AnalysisResult, CirclePolygon, GeoPoint, PredictionPoint};

use super::style::{CircleStyle, MarkerPalette, PopupContent};
use super::view::{LayerHandle, MapView, MarkerHandle, PopupHandle};

pub const UNNAMED_PLACE: &str = "Unnamed location";

/// Handles of the elements currently installed on the view.
#[derive(Debug, Default)]
pub struct OverlayState {
    circle: Option<LayerHandle>,
    markers: Vec<MarkerHandle>,
    summary: Option<PopupHandle>,
}

impl OverlayState {
    pub fn circle(&self) -> Option<LayerHandle> {
        self.circle
    }

    pub fn markers(&self) -> &[MarkerHandle] {
        &self.markers
    }

    pub fn summary(&self) -> Option<PopupHandle> {
        self.summary
    }

    pub fn is_empty(&self) -> bool {
        self.circle.is_none() && self.markers.is_empty() && self.summary.is_none()
    }
}

/// Owns the overlay state of a single map view.
///
/// The view is released by [`teardown`](Self::teardown), which also runs on
/// drop, so the render context is freed on every exit path.
pub struct OverlayLayerManager<V: MapView> {
    view: Option<V>,
    state: OverlayState,
}

impl<V: MapView> OverlayLayerManager<V> {
    pub fn new(view: V) -> Self {
        Self {
            view: Some(view),
            state: OverlayState::default(),
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    pub fn marker_count(&self) -> usize {
        self.state.markers.len()
    }

    /// Install the circle, or update the existing one in place.
    pub fn set_circle(&mut self, polygon: &CirclePolygon, style: &CircleStyle) {
        let Some(view) = self.view.as_mut() else {
            log::debug!("set_circle ignored: view already torn down");
            return;
        };
        match self.state.circle {
            Some(layer) => view.update_polygon(layer, polygon, style),
            None => self.state.circle = Some(view.add_polygon(polygon, style)),
        }
    }

    pub fn clear_circle(&mut self) {
        if let (Some(view), Some(layer)) = (self.view.as_mut(), self.state.circle.take()) {
            view.remove_polygon(layer);
        }
    }

    /// Remove every marker installed by the last `add_prediction_markers`.
    pub fn clear_prediction_markers(&mut self) {
        let markers = std::mem::take(&mut self.state.markers);
        if let Some(view) = self.view.as_mut() {
            for marker in markers {
                view.remove_marker(marker);
            }
        }
    }

    /// Install one marker per point.
    ///
    /// Callers clear the previous markers first; any still present are
    /// retired here so stale markers never coexist with new ones.
    pub fn add_prediction_markers(&mut self, points: &[PredictionPoint], palette: &MarkerPalette) {
        if !self.state.markers.is_empty() {
            log::debug!(
                "retiring {} stale markers before installing new ones",
                self.state.markers.len()
            );
            self.clear_prediction_markers();
        }
        let Some(view) = self.view.as_mut() else {
            log::debug!("add_prediction_markers ignored: view already torn down");
            return;
        };
        self.state.markers.reserve(points.len());
        for point in points {
            let style = palette.style_for(point.suitable);
            let handle = view.add_marker(&point.position(), &style, prediction_popup(point));
            self.state.markers.push(handle);
        }
    }

    /// Install or replace the summary popup at `center`.
    pub fn set_summary(&mut self, center: &GeoPoint, result: &AnalysisResult) {
        self.clear_summary();
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let title = center.name.clone().unwrap_or_else(|| "Analysis area".to_string());
        let content = PopupContent::new(title).line(result.summary().label());
        self.state.summary = Some(view.open_popup(center, content));
    }

    pub fn clear_summary(&mut self) {
        if let (Some(view), Some(popup)) = (self.view.as_mut(), self.state.summary.take()) {
            view.close_popup(popup);
        }
    }

    pub fn focus(&mut self, center: &GeoPoint, zoom: f64) {
        if let Some(view) = self.view.as_mut() {
            view.fly_to(center, zoom);
        }
    }

    /// Remove all overlays and release the view. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if self.view.is_none() {
            return;
        }
        self.clear_summary();
        self.clear_prediction_markers();
        self.clear_circle();
        if let Some(mut view) = self.view.take() {
            view.release();
        }
    }
}

impl<V: MapView> Drop for OverlayLayerManager<V> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Popup shown when a prediction marker is clicked.
pub fn prediction_popup(point: &PredictionPoint) -> PopupContent {
    let verdict = if point.suitable {
        "Suitable for a store"
    } else {
        "Not suitable"
    };
    let mut popup = PopupContent::new(point.label().unwrap_or(UNNAMED_PLACE)).line(verdict);
    if let Some(percent) = point.confidence_percent() {
        popup = popup.line(format!("Confidence: {}%", percent));
    }
    popup
}
