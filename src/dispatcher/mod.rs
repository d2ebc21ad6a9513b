//! Fan-out dispatcher
//!
//! One task reads the frame source, converts each frame and broadcasts
//! the resulting [`EventEnvelope`] to the matching topic:
//!
//! ```text
//!   FrameSource ──► Ingest::run ──► convert() ──► TopicRegistry::broadcast
//!        ▲               │                              │
//!        │          select! on                    try_send per
//!   link reader     shutdown token                subscriber queue
//! ```
//!
//! Per subscriber, envelopes of one topic arrive in broadcast order.
//! Nothing is ordered across topics.

mod ingest;

pub mod envelope;
pub mod phase;
pub mod service;

pub use envelope::EventEnvelope;
pub use phase::DispatcherPhase;
pub use service::Dispatcher;
