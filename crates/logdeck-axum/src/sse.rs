//! Server-Sent Events adapter for live tail sessions.
//!
//! Each HTTP stream owns exactly one [`TailSession`]. When the client goes
//! away axum drops the response body, which drops the session and with it
//! the file watch.

use std::convert::Infallible;
use std::time::Duration;

use axum::http::header::{CACHE_CONTROL, HeaderName};
use axum::response::IntoResponse;
use axum::response::sse::{Event, KeepAlive, Sse};
use logdeck_core::{TailEvent, TailSession};
use serde::Serialize;
use tokio_stream::StreamExt;

/// Interval between keep-alive comments on idle streams.
pub const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(15);

/// Event name used for content-free change notifications.
pub const HEARTBEAT_EVENT: &str = "heartbeat";

static X_ACCEL_BUFFERING: HeaderName = HeaderName::from_static("x-accel-buffering");

/// Payload of a content event.
#[derive(Debug, Serialize)]
struct LinePayload<'a> {
    line: &'a str,
}

/// Translate one tail event into its SSE frame.
///
/// Returns `None` if a line cannot be serialized; the stream skips it.
pub fn to_sse_event(event: &TailEvent) -> Option<Event> {
    match event {
        TailEvent::Line(line) => match serde_json::to_string(&LinePayload { line }) {
            Ok(json) => Some(Event::default().data(json)),
            Err(e) => {
                tracing::warn!("Failed to serialize tail line: {}", e);
                None
            }
        },
        TailEvent::Heartbeat => Some(Event::default().event(HEARTBEAT_EVENT).data("ping")),
    }
}

/// Build the streaming response for an open tail session.
pub fn tail_response(session: TailSession) -> impl IntoResponse {
    let stream = session.filter_map(|event| to_sse_event(&event).map(Ok::<_, Infallible>));

    let sse = Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE_INTERVAL)
            .text("ping"),
    );

    (
        [
            (CACHE_CONTROL, "no-cache"),
            (X_ACCEL_BUFFERING.clone(), "no"),
        ],
        sse,
    )
}
