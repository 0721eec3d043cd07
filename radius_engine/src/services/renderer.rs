//! Turns analysis outcomes into overlay changes.

use crate::error::AnalysisError;
use crate::models::{AnalysisResult, AnalysisSummary, GeoPoint};
use crate::overlay::{MapView, MarkerPalette, OverlayLayerManager};

/// Renders results (markers plus summary) or a user-visible error notice.
#[derive(Debug, Clone)]
pub struct ResultRenderer {
    palette: MarkerPalette,
    notice: Option<String>,
}

impl ResultRenderer {
    pub fn new(palette: MarkerPalette) -> Self {
        Self {
            palette,
            notice: None,
        }
    }

    pub fn palette(&self) -> &MarkerPalette {
        &self.palette
    }

    /// Error text currently shown to the user, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Replace the markers with `result` and show its summary at `center`.
    pub fn render<V: MapView>(
        &mut self,
        overlay: &mut OverlayLayerManager<V>,
        center: &GeoPoint,
        result: &AnalysisResult,
    ) -> AnalysisSummary {
        self.notice = None;
        overlay.clear_prediction_markers();
        overlay.add_prediction_markers(&result.points, &self.palette);
        overlay.set_summary(center, result);
        result.summary()
    }

    /// Clear markers and summary and surface `err` instead. The circle stays.
    pub fn render_error<V: MapView>(&mut self, overlay: &mut OverlayLayerManager<V>, err: &AnalysisError) {
        overlay.clear_prediction_markers();
        overlay.clear_summary();
        self.notice = Some(err.user_message());
    }
}
