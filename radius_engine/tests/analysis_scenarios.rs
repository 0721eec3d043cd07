//! End-to-end analysis cycles against a scripted service and an in-memory map.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use radius_engine::client::{ScriptedPredictionService, ScriptedReply};
use radius_engine::config::EngineConfig;
use radius_engine::error::{AnalysisError, Endpoint, TransportErrorKind};
use radius_engine::models::{GeoPoint, Theme};
use radius_engine::overlay::RecordingMapView;
use radius_engine::services::{build_circle, haversine_km, AnalysisSession, CycleOutcome, CycleState};

fn center() -> GeoPoint {
    GeoPoint::new(20.2961, 85.8245)
}

fn new_session(
    service: &ScriptedPredictionService,
    view: &RecordingMapView,
) -> AnalysisSession<RecordingMapView> {
    AnalysisSession::new(
        EngineConfig::default(),
        view.clone(),
        Arc::new(service.clone()),
        Theme::Light,
    )
}

/// Everything visible on the map, without the view-assigned handles.
fn snapshot(view: &RecordingMapView) -> (Vec<String>, Vec<String>, Vec<String>) {
    let polygons = view
        .polygons()
        .into_iter()
        .map(|p| format!("{:?} {:?}", p.polygon, p.style))
        .collect();
    let markers = view
        .markers()
        .into_iter()
        .map(|m| format!("{:?} {:?} {:?}", m.position, m.style, m.popup))
        .collect();
    let popups = view
        .popups()
        .into_iter()
        .map(|p| format!("{:?} {:?}", p.anchor, p.content))
        .collect();
    (polygons, markers, popups)
}

#[test]
fn scenario_a_circle_around_bhubaneswar() {
    let polygon = build_circle(&center(), 5.0, 64).unwrap();

    assert_eq!(polygon.len(), 65);
    assert!(polygon.is_closed());
    for point in polygon.points() {
        let d = haversine_km(&center(), &point);
        assert!((d - 5.0).abs() < 0.1, "point {:?} is {} km away", point, d);
    }
}

#[tokio::test]
async fn scenario_b_primary_success_renders_markers_and_summary() {
    let service = ScriptedPredictionService::new();
    service.push_ok(
        Endpoint::CirclePrediction,
        json!([{"latitude": 20.30, "longitude": 85.82, "suitable": true, "confidence": 0.91}]),
    );
    let view = RecordingMapView::new();
    let session = new_session(&service, &view);

    let outcome = session.analyze(center(), 5.0).await.unwrap();

    match outcome {
        CycleOutcome::Rendered { summary, .. } => assert_eq!(summary.label(), "1 suitable / 1 points"),
        other => panic!("unexpected outcome {:?}", other),
    }
    let markers = view.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].style.fill_color, "#22c55e");
    assert_eq!(markers[0].position, GeoPoint::new(20.30, 85.82));

    let popups = view.popups();
    assert_eq!(popups.len(), 1);
    assert!(popups[0].content.text().contains("1 suitable / 1 points"));
    assert_eq!(view.polygon_count(), 1);
    assert_eq!(service.call_count(Endpoint::PointPrediction), 0);
}

#[tokio::test]
async fn scenario_c_fallback_after_primary_timeout() {
    let service = ScriptedPredictionService::new();
    service
        .push_fail(Endpoint::CirclePrediction, TransportErrorKind::Timeout)
        .push_ok(
            Endpoint::PointPrediction,
            json!([{"latitude": 20.30, "longitude": 85.82, "suitable": false}]),
        );
    let view = RecordingMapView::new();
    let session = new_session(&service, &view);

    let outcome = session.analyze(center(), 5.0).await.unwrap();

    assert!(matches!(outcome, CycleOutcome::Rendered { .. }));
    let markers = view.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].style.fill_color, "#ef4444");
    assert_eq!(service.call_count(Endpoint::CirclePrediction), 1);
    assert_eq!(service.call_count(Endpoint::PointPrediction), 1);
    assert_eq!(service.calls().len(), 2);
}

#[tokio::test]
async fn scenario_d_both_attempts_fail() {
    let service = ScriptedPredictionService::new();
    service
        .push_fail(Endpoint::CirclePrediction, TransportErrorKind::Status(500))
        .push_fail(Endpoint::PointPrediction, TransportErrorKind::Connect("refused".into()));
    let view = RecordingMapView::new();
    let session = new_session(&service, &view);

    let outcome = session.analyze(center(), 5.0).await.unwrap();

    match outcome {
        CycleOutcome::Errored { error, .. } => {
            assert!(matches!(error, AnalysisError::AnalysisUnavailable { .. }))
        }
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(view.marker_count(), 0);
    assert_eq!(view.polygon_count(), 1);
    assert!(view.popups().is_empty());
    assert_eq!(session.cycle_state(), CycleState::Errored);
    assert!(session.notice().unwrap().contains("unavailable"));
}

#[tokio::test]
async fn failed_cycle_retires_previous_markers() {
    let service = ScriptedPredictionService::new();
    service
        .push_ok(
            Endpoint::CirclePrediction,
            json!([
                {"latitude": 20.30, "longitude": 85.82, "suitable": true},
                {"latitude": 20.29, "longitude": 85.81, "suitable": false}
            ]),
        )
        .push_fail(Endpoint::CirclePrediction, TransportErrorKind::Status(502))
        .push_fail(Endpoint::PointPrediction, TransportErrorKind::Status(502));
    let view = RecordingMapView::new();
    let session = new_session(&service, &view);

    session.analyze(center(), 5.0).await.unwrap();
    assert_eq!(view.marker_count(), 2);

    session.analyze(center(), 7.0).await.unwrap();
    assert_eq!(view.marker_count(), 0);
    assert_eq!(view.polygon_count(), 1);
    assert_eq!(view.polygon_updates(), 1);
}

#[tokio::test]
async fn repeated_cycles_leave_identical_overlay() {
    let body = json!([
        {"latitude": 20.30, "longitude": 85.82, "suitable": true, "confidence": 0.91},
        {"latitude": 20.28, "longitude": 85.80, "suitable": false, "confidence": 0.33,
         "place_name": "Rasulgarh"}
    ]);
    let service = ScriptedPredictionService::new();
    service
        .push_ok(Endpoint::CirclePrediction, body.clone())
        .push_ok(Endpoint::CirclePrediction, body);
    let view = RecordingMapView::new();
    let session = new_session(&service, &view);

    session.analyze(center(), 5.0).await.unwrap();
    let first = snapshot(&view);
    session.analyze(center(), 5.0).await.unwrap();
    let second = snapshot(&view);

    assert_eq!(first, second);
    assert_eq!(second.1.len(), 2);
}

#[tokio::test]
async fn stale_response_is_discarded() {
    let service = ScriptedPredictionService::new();
    service
        .push(
            Endpoint::CirclePrediction,
            ScriptedReply::ok(json!([
                {"latitude": 1.0, "longitude": 1.0, "suitable": true},
                {"latitude": 1.1, "longitude": 1.1, "suitable": true},
                {"latitude": 1.2, "longitude": 1.2, "suitable": true}
            ]))
            .delayed(Duration::from_millis(200)),
        )
        .push_ok(
            Endpoint::CirclePrediction,
            json!([{"latitude": 20.30, "longitude": 85.82, "suitable": false}]),
        );
    let view = RecordingMapView::new();
    let session = new_session(&service, &view);

    let (slow, fast) = tokio::join!(
        session.analyze(GeoPoint::new(1.0, 1.0), 5.0),
        session.analyze(center(), 5.0)
    );

    assert_eq!(slow.unwrap(), CycleOutcome::Superseded { sequence: 1 });
    assert!(matches!(fast.unwrap(), CycleOutcome::Rendered { sequence: 2, .. }));
    let markers = view.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].position, GeoPoint::new(20.30, 85.82));
    assert_eq!(session.cycle_state(), CycleState::Rendered);

    // The circle on screen belongs to the cycle whose markers were rendered.
    let polygons = view.polygons();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].polygon, build_circle(&center(), 5.0, 64).unwrap());
}

#[tokio::test]
async fn teardown_supersedes_in_flight_cycle() {
    let service = ScriptedPredictionService::new();
    service.push(
        Endpoint::CirclePrediction,
        ScriptedReply::ok(json!([{"latitude": 20.30, "longitude": 85.82, "suitable": true}]))
            .delayed(Duration::from_millis(100)),
    );
    let view = RecordingMapView::new();
    let session = new_session(&service, &view);

    let (outcome, _) = tokio::join!(session.analyze(center(), 5.0), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.teardown();
    });

    assert!(matches!(outcome.unwrap(), CycleOutcome::Superseded { .. }));
    assert!(view.is_released());
    assert_eq!(view.marker_count(), 0);
    assert_eq!(view.polygon_count(), 0);
}
