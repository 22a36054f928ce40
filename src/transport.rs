use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use tracing::debug;

use crate::error::TransportError;
use crate::signals::PlatformSignals;
use crate::snapshot::InputSnapshot;

/// Message body published every cycle. Field order is the key order on the
/// wire.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct DriverPayload {
    pub throttle: f64,
    pub brake: f64,
    pub clutch: f64,
    pub steering: f64,
    pub tilt_x: f64,
    pub tilt_y: f64,
    pub vibration: f64,
}

impl DriverPayload {
    pub fn set_inputs(&mut self, snapshot: &InputSnapshot) {
        self.throttle = snapshot.throttle;
        self.brake = snapshot.brake;
        self.clutch = snapshot.clutch;
        self.steering = snapshot.steering;
    }

    pub fn set_signals(&mut self, signals: &PlatformSignals) {
        self.tilt_x = signals.tilt_x;
        self.tilt_y = signals.tilt_y;
        self.vibration = signals.vibration;
    }
}

/// `"<topic> <json>"`.
pub fn encode_message(topic: &str, payload: &DriverPayload) -> Result<String, TransportError> {
    let json = serde_json::to_string(payload)?;
    Ok(format!("{topic} {json}"))
}

/// Publish-only, fire-and-forget channel.
pub trait Transport {
    /// Send one message already in `"<topic> <json>"` form.
    fn send_message(&mut self, message: &str) -> Result<(), TransportError>;

    fn send(&mut self, topic: &str, payload: &DriverPayload) -> Result<(), TransportError> {
        self.send_message(&encode_message(topic, payload)?)
    }
}

/// One UDP datagram per message to a `udp://host:port` endpoint. Broadcast
/// addresses are allowed.
pub struct UdpPublisher {
    sock: UdpSocket,
    target: SocketAddr,
}

impl UdpPublisher {
    pub fn connect(address: &str) -> Result<Self, TransportError> {
        let target = parse_endpoint(address)?;
        let bind_addr = if target.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
        let sock = UdpSocket::bind(bind_addr)?;
        sock.set_broadcast(true)?;
        debug!("publisher socket {} -> {}", sock.local_addr()?, target);
        Ok(Self { sock, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl Transport for UdpPublisher {
    fn send_message(&mut self, message: &str) -> Result<(), TransportError> {
        self.sock.send_to(message.as_bytes(), self.target)?;
        Ok(())
    }
}

pub fn parse_endpoint(address: &str) -> Result<SocketAddr, TransportError> {
    let rest = address
        .strip_prefix("udp://")
        .ok_or_else(|| {
            TransportError::InvalidEndpoint(format!("{address}: expected udp://host:port"))
        })?;

    rest.to_socket_addrs()
        .map_err(|e| TransportError::InvalidEndpoint(format!("{address}: {e}")))?
        .next()
        .ok_or_else(|| TransportError::InvalidEndpoint(format!("{address}: no address resolved")))
}
