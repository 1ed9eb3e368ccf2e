// Chunked JSON event streaming utilities
use crate::domain::event_log::EventLogEntry;
use axum::body::Body;
use axum::http::{header, Response, StatusCode};
use axum::response::IntoResponse;
use bytes::Bytes;
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

/// Create a chunked newline-delimited JSON streaming response.
pub fn chunked_json_stream<S>(stream: S) -> Result<Response<Body>, StatusCode>
where
    S: Stream<Item = EventLogEntry> + Send + 'static,
{
    let byte_stream = stream.map(|entry| serialize_line(&entry));
    let body = Body::from_stream(byte_stream);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .header(header::TRANSFER_ENCODING, "chunked")
        .body(body)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Serialize a single entry to one JSON line.
fn serialize_line(entry: &EventLogEntry) -> Result<Bytes, std::io::Error> {
    let mut line =
        serde_json::to_vec(entry).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    line.push(b'\n');
    Ok(Bytes::from(line))
}

/// Helper to create a streaming response from a broadcast subscription.
/// A consumer that falls behind drops the missed entries and keeps reading.
pub fn stream_from_receiver(rx: broadcast::Receiver<EventLogEntry>) -> impl IntoResponse {
    let mut inner = BroadcastStream::new(rx);
    let stream = async_stream::stream! {
        while let Some(item) = inner.next().await {
            match item {
                Ok(entry) => yield entry,
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!("event stream consumer lagged, skipped {skipped} entries");
                }
            }
        }
    };

    match chunked_json_stream(stream) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
