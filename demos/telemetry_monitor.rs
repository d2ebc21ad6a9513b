//! Telemetry monitor - prints a simulated vehicle's telemetry as JSON lines
//!
//! Run with: cargo run --example telemetry_monitor [SECONDS]
//!
//! A simulated PX4 quadrotor sends HEARTBEAT at 1 Hz and GPS_RAW_INT at
//! 5 Hz, plus an ATTITUDE frame the bridge does not convert. Two relays
//! forward the heartbeat and raw_gps topics to stdout.
//!
//! ```text
//!   SimulatedVehicle ──RawFrame──► Dispatcher ──► heartbeat ──► relay ──► stdout
//!                                             └─► raw_gps   ──► relay ──► stdout
//! ```
//!
//! Stops after SECONDS (default 10) or on Ctrl-C.

use std::io::Write;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use telemetry_bridge::convert::Px4CustomMode;
use telemetry_bridge::protocol::{
    GpsRawIntFrame, HeartbeatFrame, RawFrame, SenderId, MSG_ID_GPS_RAW_INT, MSG_ID_HEARTBEAT,
};
use telemetry_bridge::{relay, Dispatcher, DispatcherConfig, EventEnvelope, StreamSink};

/// MAVLink ATTITUDE, streamed by every autopilot but not converted here
const MSG_ID_ATTITUDE: u32 = 30;

/// Writes each envelope as one JSON line, tagged with the topic
struct StdoutSink {
    label: &'static str,
}

#[derive(Debug)]
struct SinkError(String);

impl StreamSink for StdoutSink {
    type Error = SinkError;

    async fn send(&mut self, envelope: EventEnvelope) -> Result<(), SinkError> {
        let json = serde_json::to_string(&envelope).map_err(|e| SinkError(e.to_string()))?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "[{}] {}", self.label, json).map_err(|e| SinkError(e.to_string()))
    }
}

/// PX4 quadrotor flying a mission around Zurich
struct SimulatedVehicle {
    sender: SenderId,
    tick: u64,
}

impl SimulatedVehicle {
    fn new() -> Self {
        Self {
            sender: SenderId::new(1, 1),
            tick: 0,
        }
    }

    fn heartbeat(&self) -> RawFrame {
        // Armed, custom mode enabled; AUTO/MISSION
        let hb = HeartbeatFrame {
            custom_mode: 0x0404_0000,
            vehicle_type: 2,
            autopilot: 12,
            base_mode: 0b1001_1101,
            system_status: 4,
            mavlink_version: 3,
        };
        RawFrame::new(MSG_ID_HEARTBEAT, self.sender, hb.encode())
    }

    fn gps(&self) -> RawFrame {
        let step = self.tick as i32;
        let gps = GpsRawIntFrame {
            time_usec: self.tick * 200_000,
            lat: 473_977_420 + step * 15,
            lon: 85_455_940 + step * 10,
            alt: 488_000 + step * 20,
            eph: 90,
            epv: 140,
            vel: 350,
            cog: 4_500,
            fix_type: 3,
            satellites_visible: 16,
            // No heading from this receiver
            yaw: 0,
            ..Default::default()
        };
        RawFrame::new(MSG_ID_GPS_RAW_INT, self.sender, gps.encode())
    }

    fn attitude(&self) -> RawFrame {
        RawFrame::new(MSG_ID_ATTITUDE, self.sender, Bytes::from_static(&[0u8; 28]))
    }

    async fn run(mut self, link: mpsc::Sender<RawFrame>, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(Duration::from_millis(200));

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let mut frames = vec![self.gps(), self.attitude()];
            if self.tick % 5 == 0 {
                frames.push(self.heartbeat());
            }

            for frame in frames {
                if link.send(frame).await.is_err() {
                    return;
                }
            }

            self.tick += 1;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let seconds: u64 = std::env::args()
        .nth(1)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(10);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("telemetry_bridge=debug".parse()?)
                .add_directive("telemetry_monitor=debug".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DispatcherConfig::from_env()?;
    let dispatcher = Dispatcher::new(config);

    let (link, source) = dispatcher.frame_channel::<RawFrame>();
    dispatcher.start(source)?;

    tracing::info!(
        custom_mode = %Px4CustomMode::new(0x0404_0000),
        "Simulated vehicle mode"
    );

    let cancel = CancellationToken::new();

    let heartbeats = dispatcher.subscribe_heartbeat(&cancel).await?;
    let fixes = dispatcher.subscribe_raw_gps(&cancel).await?;

    let mut relays = Vec::new();
    for (label, subscription) in [("heartbeat", heartbeats), ("raw_gps", fixes)] {
        let cancel = cancel.clone();
        relays.push(tokio::spawn(async move {
            let mut sink = StdoutSink { label };
            match relay(subscription, &mut sink, &cancel).await {
                Ok(end) => tracing::info!(relay = label, ?end, "Relay ended"),
                Err(e) => tracing::warn!(relay = label, error = ?e, "Relay failed"),
            }
        }));
    }

    let vehicle = tokio::spawn(SimulatedVehicle::new().run(link, cancel.clone()));

    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(seconds)) => {}
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nShutting down...");
        }
    }

    // Stopping the dispatcher first lets the relays end with SourceClosed
    dispatcher.shutdown().await;
    cancel.cancel();

    vehicle.await?;
    for handle in relays {
        handle.await?;
    }

    let stats = dispatcher.stats();
    eprintln!("{}", serde_json::to_string_pretty(&stats)?);

    Ok(())
}
