//! Byte-level packet construction for decoder tests

use crate::packet::{DHCP_MAGIC_COOKIE, FIXED_HEADER_LEN};
use std::net::Ipv4Addr;

/// Writes a BOOTP header, a cookie and raw option TLVs
pub struct PacketBuilder {
    header: [u8; FIXED_HEADER_LEN],
    cookie: u32,
    options: Vec<u8>,
}

impl PacketBuilder {
    /// Ethernet BOOTREQUEST with everything else zeroed
    pub fn new() -> Self {
        let mut header = [0u8; FIXED_HEADER_LEN];
        header[0] = 1; // BOOTREQUEST
        header[1] = 1; // Ethernet
        header[2] = 6;
        Self {
            header,
            cookie: DHCP_MAGIC_COOKIE,
            options: Vec::new(),
        }
    }

    pub fn op(mut self, op: u8) -> Self {
        self.header[0] = op;
        self
    }

    pub fn hlen(mut self, hlen: u8) -> Self {
        self.header[2] = hlen;
        self
    }

    pub fn hops(mut self, hops: u8) -> Self {
        self.header[3] = hops;
        self
    }

    pub fn xid(mut self, xid: u32) -> Self {
        self.header[4..8].copy_from_slice(&xid.to_be_bytes());
        self
    }

    pub fn secs(mut self, secs: u16) -> Self {
        self.header[8..10].copy_from_slice(&secs.to_be_bytes());
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.header[10..12].copy_from_slice(&flags.to_be_bytes());
        self
    }

    pub fn ciaddr(mut self, addr: Ipv4Addr) -> Self {
        self.header[12..16].copy_from_slice(&addr.octets());
        self
    }

    pub fn yiaddr(mut self, addr: Ipv4Addr) -> Self {
        self.header[16..20].copy_from_slice(&addr.octets());
        self
    }

    pub fn siaddr(mut self, addr: Ipv4Addr) -> Self {
        self.header[20..24].copy_from_slice(&addr.octets());
        self
    }

    pub fn giaddr(mut self, addr: Ipv4Addr) -> Self {
        self.header[24..28].copy_from_slice(&addr.octets());
        self
    }

    pub fn chaddr(mut self, hw: &[u8]) -> Self {
        self.header[28..28 + hw.len()].copy_from_slice(hw);
        self
    }

    pub fn sname(mut self, name: &[u8]) -> Self {
        self.header[44..44 + name.len()].copy_from_slice(name);
        self
    }

    pub fn bootfile(mut self, name: &[u8]) -> Self {
        self.header[108..108 + name.len()].copy_from_slice(name);
        self
    }

    pub fn cookie(mut self, cookie: u32) -> Self {
        self.cookie = cookie;
        self
    }

    pub fn option(mut self, code: u8, data: &[u8]) -> Self {
        self.options.push(code);
        self.options.push(data.len() as u8);
        self.options.extend_from_slice(data);
        self
    }

    pub fn end(mut self) -> Self {
        self.options.push(255);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut bytes = self.header.to_vec();
        bytes.extend_from_slice(&self.cookie.to_be_bytes());
        bytes.extend_from_slice(&self.options);
        bytes
    }
}

impl Default for PacketBuilder {
    fn default() -> Self {
        Self::new()
    }
}
