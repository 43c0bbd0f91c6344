//! Worker-backed alert dispatcher

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::event::AlertEvent;
use crate::sink::AlertSink;

/// Queue depth for pending alerts. Alerts are rare (cooldown-limited), so a
/// full queue means the sink is stuck; dropping is the right degradation.
const QUEUE_CAPACITY: usize = 32;

/// Fire-and-forget alert dispatcher.
///
/// Owns a bounded queue and a dedicated worker thread that drains it into an
/// [`AlertSink`]. `dispatch` never blocks; delivery failures are logged by
/// the worker and never surface to the caller.
pub struct AlertDispatcher {
    sender: mpsc::Sender<AlertEvent>,
    worker: Option<std::thread::JoinHandle<()>>,
}

impl AlertDispatcher {
    /// Spawn a dispatcher draining into the given sink
    pub fn spawn<S: AlertSink + 'static>(mut sink: S) -> Self {
        let (sender, mut receiver) = mpsc::channel::<AlertEvent>(QUEUE_CAPACITY);

        let worker = std::thread::spawn(move || {
            while let Some(event) = receiver.blocking_recv() {
                if let Err(e) = sink.deliver(&event) {
                    warn!(id = %event.id, "Alert delivery failed, degrading to log: {}", e);
                } else {
                    debug!(id = %event.id, "Alert delivered");
                }
            }
            debug!("Alert dispatcher worker exiting");
        });

        Self {
            sender,
            worker: Some(worker),
        }
    }

    /// Enqueue an alert without blocking.
    ///
    /// Returns whether the event was queued; a full or closed queue drops
    /// the event with a warning.
    pub fn dispatch(&self, event: AlertEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!(id = %event.id, "Alert queue full, dropping event");
                false
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                warn!(id = %event.id, "Alert worker gone, dropping event");
                false
            }
        }
    }

    /// Close the queue, drain pending alerts, and join the worker
    pub fn shutdown(self) {
        let Self { sender, worker } = self;
        drop(sender);
        if let Some(handle) = worker {
            let _ = handle.join();
        }
    }
}
