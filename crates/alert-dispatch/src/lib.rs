//! Alert Dispatch
//!
//! Fire-and-forget delivery of drowsiness alerts. The frame-processing path
//! only ever enqueues; delivery (speech synthesis, logging) runs on a
//! dedicated worker so a slow or failing alert mechanism can never stall
//! frame throughput.

mod dispatcher;
mod event;
mod sink;

pub use dispatcher::AlertDispatcher;
pub use event::{AlertEvent, DEFAULT_ALERT_MESSAGE};
pub use sink::{AlertSink, CommandSink, LogSink, SinkError};
