use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use dashboard_core::Snapshot;
use dashboard_logging::{dash_info, dash_warn};
use tokio_util::sync::CancellationToken;

use crate::subscribe::{
    pump, ChannelEventSink, EventSink, ReqwestSubscriber, SubscribeSettings, Subscriber,
};
use crate::{FailureKind, StreamError, StreamEvent};

/// Handle to the single long-lived push subscription.
///
/// The subscription runs on its own thread; events are received in arrival
/// order. It is never reopened: once [`StreamEvent::Closed`] is delivered no
/// further events arrive. Dropping the handle cancels it.
pub struct Subscription {
    event_rx: mpsc::Receiver<StreamEvent>,
    cancel: CancellationToken,
    worker: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn open(url: impl Into<String>, settings: SubscribeSettings) -> Self {
        let subscriber = Arc::new(ReqwestSubscriber::new(settings.clone()));
        Self::with_subscriber(subscriber, url, settings)
    }

    pub fn with_subscriber(
        subscriber: Arc<dyn Subscriber>,
        url: impl Into<String>,
        settings: SubscribeSettings,
    ) -> Self {
        let url = url.into();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let worker = thread::spawn(move || {
            let sink = ChannelEventSink::new(event_tx);
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    sink.emit(StreamEvent::Closed(Some(StreamError::new(
                        FailureKind::Runtime,
                        err.to_string(),
                    ))));
                    return;
                }
            };
            let result =
                runtime.block_on(run(subscriber.as_ref(), &url, &settings, &sink, &token));
            if let Err(err) = &result {
                dash_warn!("Subscription to {} ended: {}", url, err);
            }
            sink.emit(StreamEvent::Closed(result.err()));
        });

        Self {
            event_rx,
            cancel,
            worker: Some(worker),
        }
    }

    /// Next event if one is ready.
    pub fn try_recv(&self) -> Option<StreamEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks for the next event. `None` once the subscription is gone.
    pub fn recv(&self) -> Option<StreamEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<StreamEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Blocking iterator over decoded snapshots; ends when the stream closes.
    pub fn snapshots(&self) -> Snapshots<'_> {
        Snapshots { subscription: self }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

pub struct Snapshots<'a> {
    subscription: &'a Subscription,
}

impl Iterator for Snapshots<'_> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        loop {
            match self.subscription.recv()? {
                StreamEvent::Snapshot(snapshot) => return Some(*snapshot),
                StreamEvent::Closed(_) => return None,
                StreamEvent::Opened | StreamEvent::Skipped(_) => {}
            }
        }
    }
}

async fn run(
    subscriber: &dyn Subscriber,
    url: &str,
    settings: &SubscribeSettings,
    sink: &dyn EventSink,
    cancel: &CancellationToken,
) -> Result<(), StreamError> {
    let body = tokio::select! {
        _ = cancel.cancelled() => return Ok(()),
        connected = subscriber.connect(url) => connected?,
    };
    dash_info!("Subscribed to {}", url);
    sink.emit(StreamEvent::Opened);
    pump(body, settings, sink, cancel).await
}
