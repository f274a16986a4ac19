use chrono::{DateTime, Utc};
use dhcp_proto::{DecodeError, DhcpPacket};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::classify::classify;
use crate::config::Config;

/// An Android device seen asking for an address
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discovery {
    pub hostname: Option<String>,
    pub client_mac: String,
    pub xid: u32,
    pub source: SocketAddr,
    pub seen_at: DateTime<Utc>,
}

/// Decode one UDP payload and turn it into a discovery if it came from Android
pub fn inspect_datagram(
    data: &[u8],
    source: SocketAddr,
) -> Result<Option<Discovery>, DecodeError> {
    let packet = DhcpPacket::parse(data)?;
    let verdict = classify(&packet);
    let client_mac = packet.client_mac().to_string();

    if !verdict.is_android {
        debug!("DHCP packet from {} ({}) is not Android", client_mac, source);
        return Ok(None);
    }

    Ok(Some(Discovery {
        hostname: verdict.hostname,
        client_mac,
        xid: packet.xid,
        source,
        seen_at: Utc::now(),
    }))
}

/// Listens on one address for DHCP client traffic
pub struct Detector {
    socket: UdpSocket,
    recv_buffer_size: usize,
}

impl Detector {
    pub async fn bind(addr: SocketAddr, recv_buffer_size: usize) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind(addr).await?;
        socket.set_broadcast(true)?;
        Ok(Self {
            socket,
            recv_buffer_size,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive until the discovery receiver goes away
    ///
    /// Undecodable packets are logged and dropped.
    pub async fn run(self, events: mpsc::Sender<Discovery>) -> anyhow::Result<()> {
        let addr = self.local_addr()?;
        info!("Android detector listening on {}", addr);

        let mut buf = vec![0u8; self.recv_buffer_size];

        loop {
            let (len, src) = tokio::select! {
                _ = events.closed() => {
                    info!("Discovery receiver closed, stopping listener on {}", addr);
                    return Ok(());
                }
                received = self.socket.recv_from(&mut buf) => received?,
            };
            debug!("Received {} bytes from {}", len, src);

            let discovery = match inspect_datagram(&buf[..len], src) {
                Ok(Some(discovery)) => discovery,
                Ok(None) => continue,
                Err(e @ DecodeError::BadMagicCookie { .. }) => {
                    debug!("Ignoring non-DHCP packet from {}: {}", src, e);
                    continue;
                }
                Err(e) => {
                    warn!("Failed to parse DHCP packet from {}: {}", src, e);
                    continue;
                }
            };

            if events.send(discovery).await.is_err() {
                info!("Discovery receiver closed, stopping listener on {}", addr);
                return Ok(());
            }
        }
    }
}

/// Bind every configured address, then listen on each in its own task
pub async fn run_all(
    config: Arc<Config>,
    events: mpsc::Sender<Discovery>,
) -> anyhow::Result<Vec<JoinHandle<()>>> {
    let mut detectors = Vec::with_capacity(config.listen_addresses.len());
    for listen_addr in &config.listen_addresses {
        let addr = SocketAddr::new((*listen_addr).into(), config.port);
        info!("Binding to {}", addr);
        let detector = Detector::bind(addr, config.recv_buffer_size)
            .await
            .map_err(|e| e.context(format!("failed to bind {addr}")))?;
        detectors.push((addr, detector));
    }

    let handles = detectors
        .into_iter()
        .map(|(addr, detector)| {
            let events = events.clone();
            tokio::spawn(async move {
                if let Err(e) = detector.run(events).await {
                    error!("Detector error on {}: {}", addr, e);
                }
            })
        })
        .collect();

    Ok(handles)
}
