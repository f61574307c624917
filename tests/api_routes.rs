//! REST collaborator surface: workshop records and discovery.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use workshop_live::models::{ActiveWorkshop, WorkshopRecord};
use workshop_live::state::AppState;

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn create_and_list_workshops() {
    let app_state = Arc::new(AppState::new());
    let app = workshop_live::build_app(app_state.clone());

    let response = app
        .clone()
        .oneshot(json_post(
            "/api/v1/workshops",
            serde_json::json!({"contentId": "engine-v8", "createdBy": "instructor-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let record: WorkshopRecord = body_json(response).await;
    assert_eq!(record.content_id, "engine-v8");
    assert_eq!(record.created_by, "instructor-1");

    // Fresh workshop lists as open with zero occupancy.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/workshops/active")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listing: Vec<ActiveWorkshop> = body_json(response).await;
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, record.id);
    assert_eq!(listing[0].participant_count, 0);

    // Once the room lives and dies, the record drops off the listing.
    let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
    let room_key = record.id.to_string();
    app_state
        .hub
        .join(
            &room_key,
            "c1",
            workshop_live::models::Identity {
                id: "user-ada".to_string(),
                username: "ada".to_string(),
                role: "student".to_string(),
            },
            tx,
        )
        .await;
    let retired = app_state.hub.disconnect("c1").await;
    app_state.retire_workshops(&retired).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/workshops/active")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listing: Vec<ActiveWorkshop> = body_json(response).await;
    assert!(listing.is_empty());
}

#[tokio::test]
async fn create_workshop_rejects_empty_fields() {
    let app = workshop_live::build_app(Arc::new(AppState::new()));
    let response = app
        .oneshot(json_post(
            "/api/v1/workshops",
            serde_json::json!({"contentId": "", "createdBy": "instructor-1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = workshop_live::build_app(Arc::new(AppState::new()));
    for uri in ["/api/health", "/api/ready"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
