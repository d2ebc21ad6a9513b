//! Upstream frame source
//!
//! The link reader (serial/UDP/TCP, framing, checksums, signing) lives
//! outside this crate. The dispatcher only needs something that yields
//! frames until the link goes away.

use std::future::Future;

use tokio::sync::mpsc;

use super::frame::{Frame, RawFrame};

/// A lazy, single-reader sequence of decoded frames
pub trait FrameSource: Send + 'static {
    /// Wait for the next frame.
    ///
    /// Returns `None` once the source is exhausted (link dropped or reader
    /// shut down). The dispatcher never polls again after that.
    fn next_frame(&mut self) -> impl Future<Output = Option<Frame>> + Send;
}

impl FrameSource for mpsc::Receiver<Frame> {
    async fn next_frame(&mut self) -> Option<Frame> {
        self.recv().await
    }
}

/// Link readers that hand over validated payload bytes
impl FrameSource for mpsc::Receiver<RawFrame> {
    async fn next_frame(&mut self) -> Option<Frame> {
        self.recv().await.map(Frame::from)
    }
}

/// Create a bounded channel usable as a [`FrameSource`].
///
/// `T` is either [`Frame`] or [`RawFrame`].
pub fn frame_channel<T>(capacity: usize) -> (mpsc::Sender<T>, mpsc::Receiver<T>) {
    mpsc::channel(capacity.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{FramePayload, HeartbeatFrame, SenderId, MSG_ID_HEARTBEAT};

    #[tokio::test]
    async fn test_channel_source_yields_until_closed() {
        let (tx, mut source) = frame_channel::<Frame>(4);
        let frame = Frame::heartbeat(SenderId::new(1, 1), HeartbeatFrame::default());

        tx.send(frame.clone()).await.unwrap();
        drop(tx);

        assert_eq!(source.next_frame().await, Some(frame));
        assert_eq!(source.next_frame().await, None);
    }

    #[tokio::test]
    async fn test_raw_source_decodes() {
        let (tx, mut source) = frame_channel::<RawFrame>(4);
        let hb = HeartbeatFrame {
            vehicle_type: 2,
            autopilot: 12,
            ..Default::default()
        };

        tx.send(RawFrame::new(MSG_ID_HEARTBEAT, SenderId::new(1, 1), hb.encode()))
            .await
            .unwrap();

        let frame = source.next_frame().await.unwrap();
        assert_eq!(frame.payload, FramePayload::Heartbeat(hb));
    }
}
