//! MAVLink telemetry fan-out bridge
//!
//! Reads one ordered stream of MAVLink frames and republishes them as
//! typed messages to any number of independent, independently paced
//! subscribers.
//!
//! ```text
//!  link reader ──► FrameSource ──► Dispatcher ──► convert() ──► TopicRegistry
//!                                                                │     │
//!                                                   Subscription ◄─┘     └─► Subscription
//!                                                        │                       │
//!                                                     relay() ──► StreamSink  relay() ──► StreamSink
//! ```
//!
//! - [`protocol`]: frames handed over by the link reader
//! - [`convert`]: frame to domain message conversion
//! - [`registry`]: per-topic subscriber sets and subscription handles
//! - [`dispatcher`]: the ingest loop and its lifecycle
//! - [`stream`]: relaying a subscription to a downstream stream
//!
//! Delivery is at-most-once and best-effort per subscriber: each
//! subscriber has a bounded queue and loses envelopes while it is full.
//! The producer never waits on a subscriber.

pub mod config;
pub mod convert;
pub mod dispatcher;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod stats;
pub mod stream;

pub use config::DispatcherConfig;
pub use convert::{convert, DomainMessage};
pub use dispatcher::{Dispatcher, DispatcherPhase, EventEnvelope};
pub use error::{Error, Result};
pub use protocol::{Frame, FrameSource, RawFrame};
pub use registry::{Subscription, TopicKind, TopicRegistry};
pub use stream::{relay, RelayEnd, StreamSink};
