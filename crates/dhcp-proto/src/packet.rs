use crate::error::{DecodeError, Result};
use crate::option::OPTION_END;
use crate::{DhcpOption, DhcpOptions, MacAddress, Reader};
use std::net::Ipv4Addr;

// DHCP message layout (RFC 2131)
//
//  0      op | htype | hlen | hops
//  4      xid
//  8      secs | flags
//  12     ciaddr
//  16     yiaddr
//  20     siaddr
//  24     giaddr
//  28     chaddr (16)
//  44     sname (64)
//  108    bootfile (128)
//  236    magic cookie
//  240    options (variable)

/// DHCP magic cookie (RFC 2131)
pub const DHCP_MAGIC_COOKIE: u32 = 0x6382_5363;

/// Size of the BOOTP header preceding the magic cookie
pub const FIXED_HEADER_LEN: usize = 236;

/// DHCP packet structure as defined in RFC 2131
#[derive(Debug, Clone, PartialEq)]
pub struct DhcpPacket {
    pub op: u8,           // Message op code / message type
    pub htype: u8,        // Hardware address type
    pub hlen: u8,         // Hardware address length
    pub hops: u8,         // Relay hops
    pub xid: u32,         // Transaction ID
    pub secs: u16,        // Seconds elapsed
    pub flags: u16,       // Flags
    pub ciaddr: Ipv4Addr, // Client IP address
    pub yiaddr: Ipv4Addr, // 'Your' (client) IP address
    pub siaddr: Ipv4Addr, // Server IP address
    pub giaddr: Ipv4Addr, // Gateway IP address
    pub chaddr: [u8; 16], // Client hardware address, first `hlen` bytes meaningful
    pub sname: [u8; 64],  // Server host name, NUL padded
    pub bootfile: [u8; 128], // Boot file name, NUL padded
    pub options: DhcpOptions,
}

impl DhcpPacket {
    /// Parse a DHCP packet starting at the beginning of `data`
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::decode(data, 0)
    }

    /// Parse a DHCP packet starting at `offset` in `data`
    ///
    /// Decoding stops at the end option or at the end of the buffer. A
    /// truncated header, a wrong magic cookie or an option running past the
    /// buffer fails the whole packet.
    pub fn decode(data: &[u8], offset: usize) -> Result<Self> {
        let mut reader = Reader::new(data, offset);

        let op = reader.u8("op")?;
        let htype = reader.u8("htype")?;
        let hlen = reader.u8("hlen")?;
        let hops = reader.u8("hops")?;
        let xid = reader.u32("xid")?;
        let secs = reader.u16("secs")?;
        let flags = reader.u16("flags")?;
        let ciaddr = reader.ipv4("ciaddr")?;
        let yiaddr = reader.ipv4("yiaddr")?;
        let siaddr = reader.ipv4("siaddr")?;
        let giaddr = reader.ipv4("giaddr")?;
        let chaddr = reader.array::<16>("chaddr")?;
        let sname = reader.array::<64>("sname")?;
        let bootfile = reader.array::<128>("bootfile")?;

        let cookie_offset = reader.position();
        let cookie = reader.u32("magic cookie")?;
        if cookie != DHCP_MAGIC_COOKIE {
            return Err(DecodeError::BadMagicCookie {
                offset: cookie_offset,
                found: cookie,
            });
        }

        let options = Self::decode_options(&mut reader)?;

        Ok(Self {
            op,
            htype,
            hlen,
            hops,
            xid,
            secs,
            flags,
            ciaddr,
            yiaddr,
            siaddr,
            giaddr,
            chaddr,
            sname,
            bootfile,
            options,
        })
    }

    fn decode_options(reader: &mut Reader<'_>) -> Result<DhcpOptions> {
        let mut options = DhcpOptions::new();

        while !reader.is_empty() {
            let code = reader.u8("option code")?;
            if code == OPTION_END {
                break;
            }

            let len = reader
                .u8("option length")
                .map_err(|e| Self::overrun(code, e))? as usize;
            let data = reader
                .bytes("option value", len)
                .map_err(|e| Self::overrun(code, e))?;

            options.insert(DhcpOption::parse(code, data));
        }

        Ok(options)
    }

    fn overrun(code: u8, err: DecodeError) -> DecodeError {
        match err {
            DecodeError::Truncated {
                offset,
                needed,
                available,
                ..
            } => DecodeError::OptionOverrun {
                code,
                offset,
                needed,
                available,
            },
            other => other,
        }
    }

    /// Client hardware address, formatted from the first 6 bytes of `chaddr`
    pub fn client_mac(&self) -> MacAddress {
        let [a, b, c, d, e, f, ..] = self.chaddr;
        MacAddress::new([a, b, c, d, e, f])
    }

    /// Server host name up to the first NUL
    pub fn server_name(&self) -> String {
        nul_terminated(&self.sname)
    }

    /// Boot file name up to the first NUL
    pub fn boot_file_name(&self) -> String {
        nul_terminated(&self.bootfile)
    }
}

fn nul_terminated(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..end]).into_owned()
}
