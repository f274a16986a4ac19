use dhcp_proto::{DhcpOption, DhcpPacket};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::classify::{classify, Classification};

/// Printable view of a decoded packet, used by `inspect`
#[derive(Debug, Clone, Serialize)]
pub struct PacketSummary {
    pub op: u8,
    pub htype: u8,
    pub hlen: u8,
    pub hops: u8,
    pub xid: u32,
    pub secs: u16,
    pub flags: u16,
    pub ciaddr: String,
    pub yiaddr: String,
    pub siaddr: String,
    pub giaddr: String,
    pub client_mac: String,
    pub sname: String,
    pub bootfile: String,
    pub options: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub packet: PacketSummary,
    pub classification: Classification,
}

impl From<&DhcpPacket> for PacketSummary {
    fn from(packet: &DhcpPacket) -> Self {
        let options = packet
            .options
            .iter()
            .map(|(key, option)| (key.to_string(), option_value(option)))
            .collect();

        Self {
            op: packet.op,
            htype: packet.htype,
            hlen: packet.hlen,
            hops: packet.hops,
            xid: packet.xid,
            secs: packet.secs,
            flags: packet.flags,
            ciaddr: packet.ciaddr.to_string(),
            yiaddr: packet.yiaddr.to_string(),
            siaddr: packet.siaddr.to_string(),
            giaddr: packet.giaddr.to_string(),
            client_mac: packet.client_mac().to_string(),
            sname: packet.server_name(),
            bootfile: packet.boot_file_name(),
            options,
        }
    }
}

impl From<&DhcpPacket> for Report {
    fn from(packet: &DhcpPacket) -> Self {
        Self {
            packet: packet.into(),
            classification: classify(packet),
        }
    }
}

fn option_value(option: &DhcpOption) -> Value {
    match option {
        DhcpOption::Hostname(s) | DhcpOption::DomainName(s) | DhcpOption::VendorClass(s) => {
            json!(s)
        }
        DhcpOption::RequestedIpAddress(ip) => json!(ip.to_string()),
        DhcpOption::MaxMessageSize(size) => json!(size),
        DhcpOption::ClientIdentifier(mac) => json!(mac.to_string()),
        DhcpOption::Unknown(_, data) => json!(data),
        DhcpOption::End => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dhcp_proto::test_helpers::PacketBuilder;

    #[test]
    fn test_report_json() {
        let data = PacketBuilder::new()
            .xid(42)
            .chaddr(&[0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff])
            .option(12, b"android-7, Pixel")
            .option(50, &[192, 168, 1, 20])
            .option(57, &[0x05, 0x78])
            .option(43, &[1, 2])
            .end()
            .build();
        let packet = DhcpPacket::parse(&data).unwrap();

        let json = serde_json::to_value(Report::from(&packet)).unwrap();
        assert_eq!(json["packet"]["xid"], 42);
        assert_eq!(json["packet"]["client_mac"], "aa:bb:cc:dd:ee:ff");
        assert_eq!(json["packet"]["ciaddr"], "0.0.0.0");
        assert_eq!(json["packet"]["options"]["hostname"], "android-7, Pixel");
        assert_eq!(json["packet"]["options"]["requested-ip"], "192.168.1.20");
        assert_eq!(json["packet"]["options"]["max-dhcp-message-size"], 1400);
        assert_eq!(json["packet"]["options"]["43"], json!([1, 2]));
        assert_eq!(json["classification"]["is_android"], true);
        assert_eq!(json["classification"]["hostname"], "android-7, Pixel");
    }
}
