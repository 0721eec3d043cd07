//! HTTP transport tests against an in-process axum server.

#![cfg(feature = "http-client")]

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use radius_engine::client::{CirclePredictionBody, HttpPredictionService, PredictionService};
use radius_engine::config::{EngineConfig, ServiceSettings};
use radius_engine::error::{AnalysisError, Endpoint, TransportErrorKind};
use radius_engine::models::{AnalysisRequest, GeoPoint, Theme};
use radius_engine::overlay::RecordingMapView;
use radius_engine::services::{AnalysisOrchestrator, AnalysisSession, CycleOutcome};

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn settings(base_url: String) -> ServiceSettings {
    ServiceSettings {
        base_url,
        ..ServiceSettings::default()
    }
}

fn request() -> AnalysisRequest {
    AnalysisRequest::new(GeoPoint::new(20.2961, 85.8245), 5.0, "open_land")
}

#[tokio::test]
async fn test_circle_request_body_and_response() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
    let recorder = seen.clone();
    let router = Router::new().route(
        "/predict-circle",
        post(move |Json(body): Json<Value>| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().push(body);
                Json(json!([
                    {"latitude": 20.30, "longitude": 85.82, "suitable": true, "confidence": 0.91},
                    {"latitude": 20.27, "longitude": 85.85, "suitable": false, "confidence": 0.2}
                ]))
            }
        }),
    );
    let base_url = spawn_server(router).await;
    let service = HttpPredictionService::new(settings(base_url)).unwrap();

    let result = AnalysisOrchestrator::new(Arc::new(service))
        .run_analysis(&request())
        .await
        .unwrap();

    assert_eq!(result.points.len(), 2);
    assert_eq!(result.summary().label(), "1 suitable / 2 points");
    assert_eq!(
        seen.lock().clone(),
        vec![json!({"latitude": 20.2961, "longitude": 85.8245, "radius": 5.0, "fclass": "open_land"})]
    );
}

#[tokio::test]
async fn test_server_error_falls_back_to_point_endpoint() {
    let router = Router::new()
        .route(
            "/predict-circle",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Model not loaded") }),
        )
        .route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                let point = &body[0];
                Json(json!([{
                    "latitude": point["latitude"],
                    "longitude": point["longitude"],
                    "suitable": false,
                    "confidence": null
                }]))
            }),
        );
    let base_url = spawn_server(router).await;
    let view = RecordingMapView::new();
    let config = EngineConfig {
        service: settings(base_url),
        ..EngineConfig::default()
    };
    let session = AnalysisSession::connect(config, view.clone(), Theme::Dark).unwrap();

    let outcome = session.analyze(GeoPoint::new(20.2961, 85.8245), 5.0).await.unwrap();

    assert!(matches!(outcome, CycleOutcome::Rendered { .. }));
    let markers = view.markers();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].position, GeoPoint::new(20.2961, 85.8245));
    assert_eq!(markers[0].style.fill_color, "#ef4444");
}

#[tokio::test]
async fn test_timeout_is_reported_as_transport_timeout() {
    let router = Router::new().route(
        "/predict-circle",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!([]))
        }),
    );
    let base_url = spawn_server(router).await;
    let service = HttpPredictionService::new(ServiceSettings {
        request_timeout_secs: Some(1),
        ..settings(base_url)
    })
    .unwrap();

    let body = CirclePredictionBody::from(&request());
    let err = service.predict_circle(&body).await.unwrap_err();

    assert_eq!(err.endpoint, Endpoint::CirclePrediction);
    assert_eq!(err.kind, TransportErrorKind::Timeout);
}

#[tokio::test]
async fn test_unreachable_service_is_unavailable() {
    let service = HttpPredictionService::new(settings("http://127.0.0.1:1".to_string())).unwrap();

    let err = AnalysisOrchestrator::new(Arc::new(service))
        .run_analysis(&request())
        .await
        .unwrap_err();

    match err {
        AnalysisError::AnalysisUnavailable { primary, fallback } => {
            assert_eq!(primary.endpoint, Endpoint::CirclePrediction);
            assert_eq!(fallback.endpoint, Endpoint::PointPrediction);
            assert!(matches!(primary.kind, TransportErrorKind::Connect(_)));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_body_is_a_transport_failure() {
    let router = Router::new()
        .route("/predict-circle", post(|| async { "<html>gateway</html>" }))
        .route("/predict", post(|| async { "<html>gateway</html>" }));
    let base_url = spawn_server(router).await;
    let service = HttpPredictionService::new(settings(base_url)).unwrap();

    let err = AnalysisOrchestrator::new(Arc::new(service))
        .run_analysis(&request())
        .await
        .unwrap_err();

    match err {
        AnalysisError::AnalysisUnavailable { primary, .. } => {
            assert!(matches!(primary.kind, TransportErrorKind::Body(_)));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn test_health_check() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({"status": "healthy", "model_loaded": false})) }),
    );
    let base_url = spawn_server(router).await;
    let service = HttpPredictionService::new(settings(base_url)).unwrap();

    let health = service.health_check().await.unwrap();

    assert!(health.is_healthy());
    assert!(!health.model_loaded);
}
