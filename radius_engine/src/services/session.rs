//! One map view's analysis cycles.
//!
//! A cycle runs `Idle -> CircleDrawn -> Requesting -> Rendered | Errored`.
//! Starting a cycle retires the previous one's markers and summary before the
//! new circle is shown. Each cycle takes a sequence number; when a response
//! arrives after a newer cycle was dispatched it is discarded, so overlapping
//! cycles can no longer overwrite each other's results. Once the view is torn
//! down the session refuses new cycles with `AnalysisError::ViewReleased`.

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::client::{PredictionService, ServiceHealth};
use crate::config::EngineConfig;
use crate::error::{AnalysisError, EngineResult, TransportError};
use crate::models::{AnalysisRequest, AnalysisSummary, GeoPoint, Theme, UserIdentity};
use crate::overlay::{MapView, OverlayLayerManager};

use super::circle::CircleBuilder;
use super::orchestrator::AnalysisOrchestrator;
use super::renderer::ResultRenderer;

/// Where the current cycle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleState {
    #[default]
    Idle,
    CircleDrawn,
    Requesting,
    Rendered,
    Errored,
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CycleState::Idle => "idle",
            CycleState::CircleDrawn => "circle drawn",
            CycleState::Requesting => "requesting",
            CycleState::Rendered => "rendered",
            CycleState::Errored => "errored",
        };
        f.write_str(name)
    }
}

/// How a dispatched cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    Rendered {
        sequence: u64,
        summary: AnalysisSummary,
    },
    /// The error was surfaced to the user; markers are cleared, the circle stays.
    Errored { sequence: u64, error: AnalysisError },
    /// A newer cycle was dispatched before this one resolved.
    Superseded { sequence: u64 },
}

impl CycleOutcome {
    pub fn sequence(&self) -> u64 {
        match self {
            CycleOutcome::Rendered { sequence, .. }
            | CycleOutcome::Errored { sequence, .. }
            | CycleOutcome::Superseded { sequence } => *sequence,
        }
    }
}

struct ViewState<V: MapView> {
    overlay: OverlayLayerManager<V>,
    renderer: ResultRenderer,
    cycle: CycleState,
    theme: Theme,
}

/// Drives analysis cycles for one map view.
pub struct AnalysisSession<V: MapView> {
    config: EngineConfig,
    circle_builder: CircleBuilder,
    orchestrator: AnalysisOrchestrator,
    user: Option<UserIdentity>,
    latest_sequence: AtomicU64,
    view: Mutex<ViewState<V>>,
}

impl<V: MapView> AnalysisSession<V> {
    pub fn new(config: EngineConfig, view: V, service: Arc<dyn PredictionService>, theme: Theme) -> Self {
        let circle_builder =
            CircleBuilder::new(config.circle.segments).with_max_abs_latitude(config.circle.max_abs_latitude);
        let renderer = ResultRenderer::new(config.style.marker_palette());

        Self {
            circle_builder,
            orchestrator: AnalysisOrchestrator::new(service),
            user: None,
            latest_sequence: AtomicU64::new(0),
            view: Mutex::new(ViewState {
                overlay: OverlayLayerManager::new(view),
                renderer,
                cycle: CycleState::Idle,
                theme,
            }),
            config,
        }
    }

    pub fn with_user(mut self, user: UserIdentity) -> Self {
        self.user = Some(user);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Label for the signed-in user, if one was supplied.
    pub fn user_label(&self) -> Option<&str> {
        self.user.as_ref().map(UserIdentity::display_name)
    }

    pub fn cycle_state(&self) -> CycleState {
        self.view.lock().cycle
    }

    pub fn theme(&self) -> Theme {
        self.view.lock().theme
    }

    /// Error text currently surfaced to the user.
    pub fn notice(&self) -> Option<String> {
        self.view.lock().renderer.notice().map(str::to_string)
    }

    pub fn marker_count(&self) -> usize {
        self.view.lock().overlay.marker_count()
    }

    /// Sequence number of the most recently dispatched cycle (0 before the first).
    pub fn latest_sequence(&self) -> u64 {
        self.latest_sequence.load(Ordering::SeqCst)
    }

    pub async fn health_check(&self) -> Result<ServiceHealth, TransportError> {
        self.orchestrator.health_check().await
    }

    /// Analyze around the searched location, or the configured default center.
    pub async fn analyze_searched(
        &self,
        searched: Option<&GeoPoint>,
        radius_km: f64,
    ) -> EngineResult<CycleOutcome> {
        self.analyze(self.config.center_for(searched), radius_km).await
    }

    /// Run one full cycle.
    ///
    /// # Returns
    /// * `Ok(CycleOutcome)` - the cycle was dispatched; see the variant for how it ended
    /// * `Err(AnalysisError::InvalidArgument)` - rejected before anything was drawn or sent
    /// * `Err(AnalysisError::ViewReleased)` - the view was torn down; nothing is sent
    pub async fn analyze(&self, center: GeoPoint, radius_km: f64) -> EngineResult<CycleOutcome> {
        let req = AnalysisRequest::new(center, radius_km, self.config.service.land_class.clone());
        let polygon = match req.validate().and_then(|_| self.circle_builder.build(&req.center, radius_km)) {
            Ok(polygon) => polygon,
            Err(err) => {
                self.view.lock().renderer.set_notice(err.user_message());
                return Err(err);
            }
        };

        let sequence = {
            let mut guard = self.view.lock();
            let state = &mut *guard;
            if !state.overlay.is_attached() {
                log::warn!("analysis requested after the map view was released");
                return Err(AnalysisError::ViewReleased);
            }
            // Numbered under the lock so draw order matches dispatch order.
            let sequence = self.latest_sequence.fetch_add(1, Ordering::SeqCst) + 1;
            let style = self.config.style.circle_style(state.theme);
            state.overlay.focus(&req.center, self.config.circle.default_zoom);
            state.overlay.set_circle(&polygon, &style);
            state.overlay.clear_prediction_markers();
            state.overlay.clear_summary();
            state.renderer.clear_notice();
            state.cycle = CycleState::CircleDrawn;
            log::debug!("cycle {} drew circle of {} km", sequence, radius_km);
            sequence
        };

        {
            let mut guard = self.view.lock();
            if sequence == self.latest_sequence.load(Ordering::SeqCst) {
                guard.cycle = CycleState::Requesting;
            }
        }

        let outcome = self.orchestrator.run_analysis(&req).await;

        let mut guard = self.view.lock();
        if sequence != self.latest_sequence.load(Ordering::SeqCst) {
            log::debug!(
                "discarding response of cycle {} (latest is {})",
                sequence,
                self.latest_sequence.load(Ordering::SeqCst)
            );
            return Ok(CycleOutcome::Superseded { sequence });
        }

        let state = &mut *guard;
        match outcome {
            Ok(result) => {
                let summary = state.renderer.render(&mut state.overlay, &req.center, &result);
                state.cycle = CycleState::Rendered;
                log::info!("cycle {}: {}", sequence, summary.label());
                Ok(CycleOutcome::Rendered { sequence, summary })
            }
            Err(error) => {
                state.renderer.render_error(&mut state.overlay, &error);
                state.cycle = CycleState::Errored;
                Ok(CycleOutcome::Errored { sequence, error })
            }
        }
    }

    /// Swap in a freshly created render context, e.g. after a theme change.
    ///
    /// The old context is torn down first, and any cycle still in flight is
    /// superseded since its visuals belonged to the old context.
    pub fn rebuild_view(&self, view: V, theme: Theme) {
        let mut guard = self.view.lock();
        self.latest_sequence.fetch_add(1, Ordering::SeqCst);
        guard.overlay.teardown();
        guard.overlay = OverlayLayerManager::new(view);
        guard.renderer.clear_notice();
        guard.cycle = CycleState::Idle;
        guard.theme = theme;
    }

    /// Release all overlays and the view. Later cycles are refused.
    pub fn teardown(&self) {
        let mut guard = self.view.lock();
        self.latest_sequence.fetch_add(1, Ordering::SeqCst);
        guard.overlay.teardown();
        guard.cycle = CycleState::Idle;
    }
}

#[cfg(feature = "http-client")]
impl<V: MapView> AnalysisSession<V> {
    /// Session talking to the configured service over HTTP.
    pub fn connect(config: EngineConfig, view: V, theme: Theme) -> EngineResult<Self> {
        let service = crate::client::HttpPredictionService::new(config.service.clone())?;
        Ok(Self::new(config, view, Arc::new(service), theme))
    }
}
