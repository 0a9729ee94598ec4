use super::*;

use std::sync::{Arc, Mutex};

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Captured {
    queries: Arc<Mutex<Vec<Option<String>>>>,
    accept: Arc<Mutex<Vec<Option<String>>>>,
}

fn fixture() -> Value {
    json!({
        "items": [
            {
                "id": "evt-1",
                "notice_id": "notice-1",
                "region": "Nairobi Region",
                "county": "Nairobi",
                "area": "Westlands",
                "date_local": "2025-11-14",
                "start_local": "09:00",
                "end_local": "17:00",
                "duration_minutes": 480,
                "places": ["Sarit Centre"],
                "source": "official"
            }
        ],
        "next_cursor": "cursor-2"
    })
}

async fn capture(
    State(state): State<Captured>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    state.queries.lock().expect("queries").push(query);
    state.accept.lock().expect("accept").push(
        headers
            .get("accept")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    );
    Json(fixture())
}

async fn spawn(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn spawn_capturing_server() -> (String, Captured) {
    let captured = Captured::default();
    let app = Router::new()
        .route("/v1/events", get(capture))
        .route("/v1/events/now", get(capture))
        .with_state(captured.clone());
    (spawn(app).await, captured)
}

#[test]
fn events_url_includes_present_params_only() {
    let client = EventsClient::new(ApiConfig::new("https://api.example.test/"));
    let url = client
        .events_url(&ListEventsParams {
            region: Some("Nairobi".into()),
            limit: None,
            ..Default::default()
        })
        .expect("url");

    assert_eq!(url.as_str(), "https://api.example.test/v1/events?region=Nairobi");
    assert!(!url.as_str().contains("limit"));
}

#[test]
fn events_url_without_params_has_no_query() {
    let client = EventsClient::new(ApiConfig::new("https://api.example.test"));
    let url = client.events_url(&ListEventsParams::default()).expect("url");
    assert_eq!(url.as_str(), "https://api.example.test/v1/events");
    assert_eq!(url.query(), None);
}

#[test]
fn events_now_url_encodes_values() {
    let client = EventsClient::new(ApiConfig::new("https://api.example.test"));
    let url = client
        .events_now_url(&EventsNowParams {
            place_like: Some("Yaya Centre & Kilimani".into()),
            limit: Some(20),
            ..Default::default()
        })
        .expect("url");

    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(url.path(), "/v1/events/now");
    assert_eq!(
        pairs,
        vec![
            ("place_like".to_string(), "Yaya Centre & Kilimani".to_string()),
            ("limit".to_string(), "20".to_string()),
        ]
    );
}

#[test]
fn base_url_path_prefix_is_preserved() {
    let client = EventsClient::new(ApiConfig::new("https://api.example.test/outages/"));
    let url = client.events_url(&ListEventsParams::default()).expect("url");
    assert_eq!(url.as_str(), "https://api.example.test/outages/v1/events");
}

#[test]
fn malformed_base_url_is_reported() {
    let client = EventsClient::new(ApiConfig::new("not a url"));
    let err = client
        .events_url(&ListEventsParams::default())
        .expect_err("must fail");
    assert!(matches!(err, EventsClientError::Url(_)));
}

#[tokio::test]
async fn fetch_events_sends_query_and_decodes_items() {
    let (server_url, captured) = spawn_capturing_server().await;
    let client = EventsClient::new(ApiConfig::new(server_url));

    let response = client
        .fetch_events(&ListEventsParams {
            sort: Some(shared::protocol::SortOrder::Asc),
            limit: Some(30),
            ..Default::default()
        })
        .await
        .expect("fetch events");

    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].id.as_str(), "evt-1");
    assert_eq!(response.next_cursor.as_deref(), Some("cursor-2"));

    let queries = captured.queries.lock().expect("queries").clone();
    assert_eq!(queries, vec![Some("sort=asc&limit=30".to_string())]);
    let accept = captured.accept.lock().expect("accept").clone();
    assert_eq!(accept, vec![Some("application/json".to_string())]);
}

#[tokio::test]
async fn fetch_events_now_hits_now_endpoint() {
    let (server_url, captured) = spawn_capturing_server().await;
    let client = EventsClient::new(ApiConfig::new(format!("{server_url}/")));

    let response = client
        .fetch_events_now(&EventsNowParams {
            county: Some("Kiambu".into()),
            ..Default::default()
        })
        .await
        .expect("fetch now");

    assert_eq!(response.items.len(), 1);
    let queries = captured.queries.lock().expect("queries").clone();
    assert_eq!(queries, vec![Some("county=Kiambu".to_string())]);
}

#[tokio::test]
async fn non_success_status_carries_status_and_body() {
    let app = Router::new().route(
        "/v1/events",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream down") }),
    );
    let client = EventsClient::new(ApiConfig::new(spawn(app).await));

    let err = client
        .fetch_events(&ListEventsParams::default())
        .await
        .expect_err("must fail");

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "API 503: upstream down");
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_text() {
    let app = Router::new().route("/v1/events/now", get(|| async { StatusCode::BAD_GATEWAY }));
    let client = EventsClient::new(ApiConfig::new(spawn(app).await));

    let err = client
        .fetch_events_now(&EventsNowParams::default())
        .await
        .expect_err("must fail");

    match err {
        EventsClientError::Http { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unexpected_body_is_a_decode_error() {
    let app = Router::new().route(
        "/v1/events",
        get(|| async { Json(json!({ "events": [] })) }),
    );
    let client = EventsClient::new(ApiConfig::new(spawn(app).await));

    let err = client
        .fetch_events(&ListEventsParams::default())
        .await
        .expect_err("must fail");
    assert!(matches!(err, EventsClientError::Decode(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let client = EventsClient::new(ApiConfig::new(format!("http://{addr}")));
    let err = client
        .fetch_events_now(&EventsNowParams::default())
        .await
        .expect_err("must fail");
    assert!(matches!(err, EventsClientError::Transport(_)), "unexpected error: {err}");
}

#[test]
fn client_reports_its_normalized_base_url() {
    let client = EventsClient::new(ApiConfig::new("https://api.example.test///"));
    assert_eq!(client.config().base_url(), "https://api.example.test");
}
