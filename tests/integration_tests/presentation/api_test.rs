use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tower::ServiceExt;

use crate::support::create_test_app;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn given_running_app_when_checking_health_then_returns_healthy() {
    let app = create_test_app();

    let response = app.router.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn given_valid_coordinates_when_posting_then_returns_transcript_and_audio() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/audio",
            serde_json::json!({"latitude": 41.5292, "longitude": -71.4188}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-narration-cache"], "miss");
    let json = body_json(response).await;
    assert!(!json["transcript"].as_str().unwrap().is_empty());
    assert_eq!(json["audioFormat"], "mp3");
    let audio = STANDARD.decode(json["audio"].as_str().unwrap()).unwrap();
    assert!(!audio.is_empty());
}

#[tokio::test]
async fn given_string_coordinates_when_posting_then_accepted() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/audio",
            serde_json::json!({"latitude": "41.5292", "longitude": "-71.4188"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn given_repeat_request_when_posting_then_second_is_cache_hit() {
    let app = create_test_app();
    let body = serde_json::json!({"latitude": 41.52345, "longitude": -71.41777});

    let first = app
        .router
        .clone()
        .oneshot(post_json("/audio", body.clone()))
        .await
        .unwrap();
    let first = body_json(first).await;

    let second = app
        .router
        .clone()
        .oneshot(post_json(
            "/audio",
            serde_json::json!({"latitude": 41.52344, "longitude": -71.41776}),
        ))
        .await
        .unwrap();

    assert_eq!(second.headers()["x-narration-cache"], "hit");
    let second = body_json(second).await;
    assert_eq!(first["transcript"], second["transcript"]);
    assert_eq!(first["audio"], second["audio"]);
    assert_eq!(app.llm.call_count(), 1);
}

#[tokio::test]
async fn given_latitude_91_when_posting_then_bad_request_without_oracle_calls() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/audio",
            serde_json::json!({"latitude": 91, "longitude": 0}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Invalid coordinates"));
    assert_eq!(app.llm.call_count(), 0);
}

#[tokio::test]
async fn given_longitude_200_when_getting_then_bad_request_without_oracle_calls() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(get("/audio?latitude=0&longitude=200"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.llm.call_count(), 0);
}

#[tokio::test]
async fn given_missing_longitude_when_posting_then_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(post_json("/audio", serde_json::json!({"latitude": 1.0})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Missing latitude or longitude"
    );
}

#[tokio::test]
async fn given_non_numeric_latitude_when_getting_then_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(get("/audio?latitude=north&longitude=1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid latitude or longitude format"
    );
}

#[tokio::test]
async fn given_blank_place_name_when_posting_then_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(post_json(
            "/audio",
            serde_json::json!({"latitude": 1.0, "longitude": 1.0, "place_name": " "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.llm.call_count(), 0);
}

#[tokio::test]
async fn given_malformed_json_when_posting_then_bad_request() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/audio")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn given_stream_endpoint_when_getting_then_raw_audio_with_content_type() {
    let app = create_test_app();

    let response = app
        .router
        .oneshot(get("/audio/stream?latitude=41.5292&longitude=-71.4188"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    let length: usize = response.headers()[header::CONTENT_LENGTH]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(bytes.len(), length);
    assert!(!bytes.is_empty());
}

#[tokio::test]
async fn given_user_id_when_posting_repeatedly_then_each_visit_generates() {
    let app = create_test_app();
    let body = serde_json::json!({"latitude": 41.5292, "longitude": -71.4188, "user_id": "u1"});

    for _ in 0..3 {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/audio/stream", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-narration-cache"], "miss");
    }

    assert_eq!(app.llm.call_count(), 3);
}

#[tokio::test]
async fn given_any_request_when_handled_then_request_id_header_present() {
    let app = create_test_app();

    let response = app.router.oneshot(get("/health")).await.unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
