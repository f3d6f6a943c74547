use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode, Version},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use gamestream::{create_router, AppState, CatalogStore, Game};

fn make_game(id: i64, title: &str) -> Game {
    Game {
        id,
        title: title.to_string(),
        thumbnail: format!("https://www.freetogame.com/g/{}/thumbnail.jpg", id),
        short_description: "A free-to-play game.".to_string(),
        game_url: format!("https://www.freetogame.com/open/{}", id),
        genre: "Shooter".to_string(),
        platform: "PC (Windows)".to_string(),
        publisher: "Publisher".to_string(),
        developer: "Developer".to_string(),
        release_date: "2022-10-04".to_string(),
    }
}

/// Create a test app around the given store.
fn create_test_app(store: Arc<CatalogStore>) -> axum::Router {
    let state = AppState::new(store, Duration::from_secs(3));
    create_router(state)
}

/// Helper to get response body as string.
async fn body_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper to read the next SSE frame from a streaming body.
async fn next_frame(body: &mut Body) -> String {
    let frame = body.frame().await.unwrap().unwrap();
    let data = frame.into_data().unwrap();
    String::from_utf8(data.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// ============================================================================
// Health, index and stats
// ============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(Arc::new(CatalogStore::new()));

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response.into_body()).await, "OK");
}

#[tokio::test]
async fn test_index_page() {
    let app = create_test_app(Arc::new(CatalogStore::new()));

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let body = body_string(response.into_body()).await;
    assert!(body.contains("new EventSource('/stream')"));
}

#[tokio::test]
async fn test_stats_empty() {
    let app = create_test_app(Arc::new(CatalogStore::new()));

    let response = app.oneshot(get("/stats")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response.into_body()).await;
    assert_eq!(body, r#"{"total_games":0,"status":"online"}"#);
}

#[tokio::test]
async fn test_stats_after_replace() {
    let store = Arc::new(CatalogStore::new());
    store.replace((1..=7).map(|id| make_game(id, "Game")).collect());
    let app = create_test_app(store);

    let response = app.oneshot(get("/stats")).await.unwrap();

    let body = body_string(response.into_body()).await;
    assert_eq!(body, r#"{"total_games":7,"status":"online"}"#);
}

#[tokio::test]
async fn test_stats_tracks_store_changes() {
    let store = Arc::new(CatalogStore::new());
    let app = create_test_app(store.clone());

    store.replace(vec![make_game(1, "One"), make_game(2, "Two")]);
    let response = app.clone().oneshot(get("/stats")).await.unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&body_string(response.into_body()).await).unwrap();
    assert_eq!(json["total_games"], 2);

    store.replace(vec![make_game(3, "Three")]);
    let response = app.oneshot(get("/stats")).await.unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&body_string(response.into_body()).await).unwrap();
    assert_eq!(json["total_games"], 1);
}

// ============================================================================
// Stream endpoint tests
// ============================================================================

#[tokio::test]
async fn test_stream_headers() {
    let app = create_test_app(Arc::new(CatalogStore::new()));

    let response = app.oneshot(get("/stream")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["content-type"], "text/event-stream");
    assert_eq!(headers["cache-control"], "no-cache");
    assert_eq!(headers["connection"], "keep-alive");
    assert_eq!(headers["x-accel-buffering"], "no");
}

#[tokio::test]
async fn test_stream_allows_cross_origin() {
    let app = create_test_app(Arc::new(CatalogStore::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stream")
                .header("Origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_stream_empty_catalog_sends_error_event() {
    let app = create_test_app(Arc::new(CatalogStore::new()));

    let response = app.oneshot(get("/stream")).await.unwrap();
    let mut body = response.into_body();

    let frame = next_frame(&mut body).await;
    assert_eq!(
        frame,
        "event: error\ndata: {\"message\":\"No games available\"}\n\n"
    );
}

#[tokio::test]
async fn test_stream_first_frame_is_game() {
    let store = Arc::new(CatalogStore::new());
    store.replace(vec![make_game(540, "Overwatch 2")]);
    let app = create_test_app(store);

    let response = app.oneshot(get("/stream")).await.unwrap();
    let mut body = response.into_body();

    let frame = next_frame(&mut body).await;
    assert!(frame.starts_with("data: "));
    assert!(frame.ends_with("\n\n"));

    let payload = frame
        .strip_prefix("data: ")
        .unwrap()
        .trim_end_matches('\n');
    let json: serde_json::Value = serde_json::from_str(payload).unwrap();

    assert_eq!(json["id"], 540);
    assert_eq!(json["title"], "Overwatch 2");
    assert_eq!(json["genre"], "Shooter");
    assert_eq!(json["platform"], "PC (Windows)");
    assert_eq!(json["release_date"], "2022-10-04");
    assert_eq!(json.as_object().unwrap().len(), 10);
}

#[tokio::test(start_paused = true)]
async fn test_stream_emits_on_tick() {
    let store = Arc::new(CatalogStore::new());
    let app = create_test_app(store.clone());

    let response = app.oneshot(get("/stream")).await.unwrap();
    let mut body = response.into_body();

    let first = next_frame(&mut body).await;
    assert!(first.starts_with("event: error\n"));

    // Catalog arrives between ticks; the next tick picks it up.
    store.replace(vec![make_game(1, "One"), make_game(2, "Two")]);
    let started = tokio::time::Instant::now();

    let second = next_frame(&mut body).await;
    assert!(second.starts_with("data: "));
    assert_eq!(started.elapsed(), Duration::from_secs(3));

    let third = next_frame(&mut body).await;
    assert!(third.starts_with("data: "));
    assert_eq!(started.elapsed(), Duration::from_secs(6));
}

#[tokio::test]
async fn test_stream_rejects_http10() {
    let app = create_test_app(Arc::new(CatalogStore::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stream")
                .version(Version::HTTP_10)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_string(response.into_body()).await;
    assert_eq!(body, r#"{"error":"SSE not supported"}"#);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = create_test_app(Arc::new(CatalogStore::new()));

    let response = app.oneshot(get("/games")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
