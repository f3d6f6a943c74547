use axum::{
    extract::State,
    http::{header, HeaderName, StatusCode, Version},
    response::{
        sse::{Event, Sse},
        IntoResponse, Response,
    },
    Json,
};
use futures_util::stream;
use thiserror::Error;

use crate::session::{SessionMessage, StreamSession};
use crate::state::AppState;

const X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

/// Error returned when a connection cannot carry an event stream.
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("SSE not supported")]
    Unsupported(Version),
}

impl IntoResponse for StreamError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// GET /stream - Push a random game now and then on every tick.
pub async fn stream_games(
    State(state): State<AppState>,
    version: Version,
) -> Result<Response, StreamError> {
    // Pre-1.1 connections have no chunked encoding or persistent connections.
    if version == Version::HTTP_09 || version == Version::HTTP_10 {
        tracing::warn!("Rejected stream request over {:?}", version);
        return Err(StreamError::Unsupported(version));
    }

    let session = StreamSession::new(state.store.clone(), state.stream_tick);
    let (rx, _task) = session.spawn();

    // The body owns the receiver; hyper drops it on disconnect, which ends the session.
    let events = stream::unfold(rx, |mut rx| async move {
        let message = rx.recv().await?;
        Some((to_event(message), rx))
    });

    Ok((
        [
            (header::CONNECTION, "keep-alive"),
            (X_ACCEL_BUFFERING, "no"),
        ],
        Sse::new(events),
    )
        .into_response())
}

fn to_event(message: SessionMessage) -> Result<Event, axum::Error> {
    match message {
        SessionMessage::Game(game) => Event::default().json_data(game),
        SessionMessage::NoGames(error) => Event::default().event("error").json_data(error),
    }
}
