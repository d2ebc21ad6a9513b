//! Streaming adapter
//!
//! Bridges a [`Subscription`](crate::registry::Subscription) to one open
//! downstream stream. The transport behind the stream lives outside this
//! crate and only needs to implement [`StreamSink`].

pub mod relay;
pub mod sink;

pub use relay::{relay, RelayEnd};
pub use sink::StreamSink;
