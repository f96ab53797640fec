use std::pin::Pin;
use std::sync::mpsc;
use std::time::Duration;

use bytes::Bytes;
use dashboard_logging::{dash_debug, dash_trace, dash_warn};
use futures_util::{Stream, StreamExt};
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use tokio_util::sync::CancellationToken;

use crate::sse::{Decoded, EventStreamDecoder, Utf8StreamDecoder};
use crate::{decode_payload, FailureKind, SkipReason, StreamError, StreamEvent};

const EVENT_STREAM: &str = "text/event-stream";

#[derive(Debug, Clone)]
pub struct SubscribeSettings {
    pub connect_timeout: Duration,
    /// Largest single event accepted; bigger events are skipped.
    pub max_event_bytes: usize,
}

impl Default for SubscribeSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            max_event_bytes: 1024 * 1024,
        }
    }
}

/// Raw body chunks of an open subscription.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StreamError>> + Send>>;

pub trait EventSink: Send + Sync {
    fn emit(&self, event: StreamEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<StreamEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<StreamEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: StreamEvent) {
        let _ = self.tx.send(event);
    }
}

/// Transport seam: opens the push channel and hands back its body.
#[async_trait::async_trait]
pub trait Subscriber: Send + Sync {
    async fn connect(&self, url: &str) -> Result<ByteStream, StreamError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSubscriber {
    settings: SubscribeSettings,
}

impl ReqwestSubscriber {
    pub fn new(settings: SubscribeSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, StreamError> {
        // No request timeout: the body stays open for the life of the page.
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .build()
            .map_err(|err| StreamError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Subscriber for ReqwestSubscriber {
    async fn connect(&self, url: &str) -> Result<ByteStream, StreamError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| StreamError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client
            .get(parsed)
            .header(ACCEPT, EVENT_STREAM)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StreamError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            let mime = ct.split(';').next().unwrap_or(ct).trim();
            if !mime.eq_ignore_ascii_case(EVENT_STREAM) {
                return Err(StreamError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "not an event stream",
                ));
            }
        }

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_reqwest_error));
        Ok(Box::pin(body))
    }
}

/// Drives an open subscription until the body ends or `cancel` fires,
/// publishing one event per decoded message, in arrival order.
pub async fn pump(
    mut body: ByteStream,
    settings: &SubscribeSettings,
    sink: &dyn EventSink,
    cancel: &CancellationToken,
) -> Result<(), StreamError> {
    let mut text = Utf8StreamDecoder::new();
    let mut decoder = EventStreamDecoder::new(settings.max_event_bytes);

    loop {
        let next = tokio::select! {
            _ = cancel.cancelled() => {
                dash_debug!("Subscription cancelled");
                return Ok(());
            }
            next = body.next() => next,
        };
        let Some(chunk) = next else {
            break;
        };
        let chunk = chunk?;
        for decoded in decoder.feed(&text.decode(&chunk, false)) {
            publish(decoded, sink);
        }
    }

    // An event without its terminating blank line is discarded at end of body.
    for decoded in decoder.feed(&text.decode(&[], true)) {
        publish(decoded, sink);
    }
    dash_debug!("Event stream ended");
    Ok(())
}

fn publish(decoded: Decoded, sink: &dyn EventSink) {
    let event = match decoded {
        Decoded::Oversized { max_bytes } => {
            dash_warn!("Dropped event larger than {} bytes", max_bytes);
            sink.emit(StreamEvent::Skipped(SkipReason::Oversized { max_bytes }));
            return;
        }
        Decoded::Event(event) => event,
    };
    if !event.is_message() {
        dash_trace!("Ignoring event of type {:?}", event.event);
        return;
    }
    match decode_payload(&event.data) {
        Ok(Some(snapshot)) => sink.emit(StreamEvent::Snapshot(Box::new(snapshot))),
        Ok(None) => dash_trace!("Ignoring empty message"),
        Err(err) => {
            dash_warn!("Skipping message: {}", err);
            sink.emit(StreamEvent::Skipped(SkipReason::Malformed(err.to_string())));
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> StreamError {
    if err.is_timeout() {
        return StreamError::new(FailureKind::Timeout, err.to_string());
    }
    StreamError::new(FailureKind::Network, err.to_string())
}
