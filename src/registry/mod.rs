//! Topic registry for telemetry fan-out
//!
//! The registry keeps one subscriber set per topic and delivers each
//! [`EventEnvelope`](crate::dispatcher::EventEnvelope) to every subscriber
//! of its topic. Each subscriber owns a small bounded queue; a full queue
//! loses the envelope for that subscriber only, so delivery is
//! at-most-once and best-effort.
//!
//! # Architecture
//!
//! ```text
//!                          Arc<TopicRegistry>
//!                     ┌─────────────────────────┐
//!                     │ heartbeat: RwLock<Vec<  │
//!                     │   Endpoint { tx } >     │
//!                     │ raw_gps:   RwLock<Vec<  │
//!                     │   Endpoint { tx } >     │
//!                     │ watchers: TaskTracker   │
//!                     └───────────┬─────────────┘
//!                                 │
//!         ┌───────────────────────┼───────────────────────┐
//!         │                       │                       │
//!         ▼                       ▼                       ▼
//!    [Dispatcher]           [Subscription]          [Subscription]
//!    broadcast()            rx.recv()               rx.recv()
//!    (read lock,            │                       │
//!     try_send)             ▼                       ▼
//!                        relay() ──► sink        relay() ──► sink
//! ```
//!
//! # Lifetimes
//!
//! Every subscription gets a watcher task bound to a child of the
//! caller's cancellation token. When the token fires, or the
//! [`Subscription`] is dropped, the watcher removes the endpoint. Removing
//! the endpoint drops its sender, which is what closes the reader's
//! queue, so a queue can only ever be closed once.

pub mod endpoint;
pub mod error;
pub mod store;
pub mod subscription;
pub mod topic;

pub use endpoint::SubscriberId;
pub use error::RegistryError;
pub use store::TopicRegistry;
pub use subscription::Subscription;
pub use topic::{BroadcastReport, TopicKind};
