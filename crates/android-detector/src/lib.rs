//! Spots Android devices joining the network from their DHCP traffic
//!
//! Datagrams sent to the DHCP server port are decoded with `dhcp-proto`,
//! classified by hostname and vendor class, and every match is published as
//! a [`Discovery`] on a channel for whatever automation wants to react.

pub mod classify;
pub mod config;
pub mod detector;
pub mod summary;

pub use classify::{classify, classify_options, Classification};
pub use config::{Config, OutputFormat};
pub use detector::{inspect_datagram, run_all, Detector, Discovery};
pub use summary::{PacketSummary, Report};
