//! DHCP (BOOTP) packet decoding library
//!
//! This library turns the UDP payload of a DHCP message into a structured
//! [`DhcpPacket`] without any business logic dependencies. Only decoding is
//! provided; packets are never built or sent from here.

pub mod error;
pub mod mac;
pub mod option;
pub mod packet;
pub mod reader;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use error::DecodeError;
pub use mac::{MacAddress, MacParseError};
pub use option::{DhcpOption, DhcpOptions, OptionKey};
pub use packet::DhcpPacket;
pub use reader::Reader;
