use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tokio::{net::TcpListener, sync::oneshot, sync::Mutex};

#[derive(Clone)]
struct CaptureState {
    tx: Arc<Mutex<Option<oneshot::Sender<serde_json::Value>>>>,
}

async fn spawn_backend(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/api")
}

#[tokio::test]
async fn decodes_health_probe_response() {
    let app = Router::new().route(
        "/api/health",
        get(|| async {
            Json(serde_json::json!({
                "status": "healthy",
                "mailbox_connected": true,
            }))
        }),
    );
    let backend = HttpBackend::new(spawn_backend(app).await);

    let health = backend.health().await.expect("health response");
    assert!(health.mailbox_connected);
    assert_eq!(health.status.as_deref(), Some("healthy"));
}

#[tokio::test]
async fn decodes_unread_listing_in_received_order() {
    let app = Router::new().route(
        "/api/fetch-emails",
        get(|| async {
            Json(serde_json::json!({
                "count": 2,
                "emails": [
                    {"id": "m1", "subject": "Standup", "from": "alice@example.com", "snippet": "10am"},
                    {"id": "m2"},
                ],
            }))
        }),
    );
    let backend = HttpBackend::new(spawn_backend(app).await);

    let listing = backend.fetch_emails().await.expect("listing");
    assert_eq!(listing.count, 2);
    assert_eq!(listing.emails[0].sender.as_deref(), Some("alice@example.com"));
    assert_eq!(listing.emails[1].id.as_deref(), Some("m2"));
    assert_eq!(listing.emails[1].subject, None);
}

#[tokio::test]
async fn decodes_scheduling_listing_with_embedded_draft() {
    let app = Router::new().route(
        "/api/scheduling-emails",
        get(|| async {
            Json(serde_json::json!({
                "scheduling_count": 1,
                "total_checked": 10,
                "scheduling_emails": [{
                    "email_id": "s1",
                    "subject": "Planning sync",
                    "from": "bob@example.com",
                    "snippet": "tuesday 10am",
                    "has_scheduling": true,
                    "scheduling_data": {
                        "title": "Planning sync",
                        "date": "2025-03-04",
                        "start_time": "10:00",
                        "end_time": "10:30",
                    },
                }],
            }))
        }),
    );
    let backend = HttpBackend::new(spawn_backend(app).await);

    let listing = backend
        .fetch_scheduling_emails()
        .await
        .expect("scheduling listing");
    assert_eq!(listing.scheduling_count, 1);
    assert_eq!(listing.total_checked, 10);
    let draft = listing.scheduling_emails[0]
        .scheduling_data
        .as_ref()
        .expect("embedded draft");
    assert_eq!(draft.title, "Planning sync");
    assert_eq!(draft.location, None);
}

#[tokio::test]
async fn surfaces_backend_error_message_from_failure_body() {
    let app = Router::new().route(
        "/api/fetch-emails",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Mailbox service not initialized"})),
            )
        }),
    );
    let backend = HttpBackend::new(spawn_backend(app).await);

    let err = backend.fetch_emails().await.expect_err("failure");
    assert_eq!(
        err.banner_message("Failed to fetch emails"),
        "Mailbox service not initialized"
    );
}

#[tokio::test]
async fn falls_back_when_failure_body_has_no_message() {
    let app = Router::new().route(
        "/api/scheduling-emails",
        get(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
    );
    let backend = HttpBackend::new(spawn_backend(app).await);

    let err = backend
        .fetch_scheduling_emails()
        .await
        .expect_err("failure");
    match &err {
        TransportError::Api { status, message } => {
            assert_eq!(*status, 502);
            assert_eq!(*message, None);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.banner_message("Failed to fetch scheduling emails"),
        "Failed to fetch scheduling emails"
    );
}

#[tokio::test]
async fn posts_scheduling_draft_verbatim_without_absent_optionals() {
    let (tx, rx) = oneshot::channel();
    let state = CaptureState {
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route(
            "/api/schedule-event",
            post(
                |State(state): State<CaptureState>, Json(body): Json<serde_json::Value>| async move {
                    if let Some(tx) = state.tx.lock().await.take() {
                        let _ = tx.send(body);
                    }
                    Json(serde_json::json!({
                        "success": true,
                        "message": "Event created successfully",
                    }))
                },
            ),
        )
        .with_state(state);
    let backend = HttpBackend::new(spawn_backend(app).await);

    let draft = EventDraft {
        title: "Planning sync".to_string(),
        date: "2025-03-04".to_string(),
        start_time: "10:00".to_string(),
        end_time: "10:30".to_string(),
        location: None,
        participants: None,
    };
    let outcome = backend.schedule_event(&draft).await.expect("submission");
    assert!(outcome.success);

    let body = rx.await.expect("captured request body");
    let payload = body
        .get("scheduling_data")
        .and_then(|value| value.as_object())
        .expect("scheduling_data object");
    assert_eq!(payload["title"], "Planning sync");
    assert_eq!(payload["end_time"], "10:30");
    assert!(!payload.contains_key("location"));
    assert!(!payload.contains_key("participants"));
}

#[tokio::test]
async fn connection_refused_maps_to_unreachable() {
    let backend = HttpBackend::new("http://127.0.0.1:9/api");

    let err = backend.fetch_emails().await.expect_err("unreachable");
    assert!(matches!(err, TransportError::Unreachable(_)));
}
