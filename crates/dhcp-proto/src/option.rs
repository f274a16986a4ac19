use crate::MacAddress;
use std::collections::HashMap;
use std::fmt;
use std::net::Ipv4Addr;

pub const OPTION_HOSTNAME: u8 = 12;
pub const OPTION_DOMAIN_NAME: u8 = 15;
pub const OPTION_REQUESTED_IP: u8 = 50;
pub const OPTION_MAX_MESSAGE_SIZE: u8 = 57;
pub const OPTION_VENDOR_CLASS: u8 = 60;
pub const OPTION_CLIENT_ID: u8 = 61;
pub const OPTION_END: u8 = 255;

/// Key under which a decoded option is stored
///
/// Recognized codes get a name, everything else stays keyed by its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    Hostname,
    DomainName,
    RequestedIp,
    MaxMessageSize,
    VendorClass,
    ClientId,
    Code(u8),
}

impl OptionKey {
    /// Well-known name, `None` for numeric keys
    pub fn name(&self) -> Option<&'static str> {
        match self {
            Self::Hostname => Some("hostname"),
            Self::DomainName => Some("domainname"),
            Self::RequestedIp => Some("requested-ip"),
            Self::MaxMessageSize => Some("max-dhcp-message-size"),
            Self::VendorClass => Some("vendor-class"),
            Self::ClientId => Some("client-id"),
            Self::Code(_) => None,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            named => f.write_str(named.name().unwrap_or_default()),
        }
    }
}

/// DHCP options understood by the decoder (RFC 2132)
#[derive(Debug, Clone, PartialEq)]
pub enum DhcpOption {
    Hostname(String),
    DomainName(String),
    RequestedIpAddress(Ipv4Addr),
    MaxMessageSize(u16),
    VendorClass(String),
    ClientIdentifier(MacAddress),
    End,
    Unknown(u8, Vec<u8>),
}

impl DhcpOption {
    /// Decode a single option from its code and value bytes
    ///
    /// Never fails: unknown codes, and known codes whose value has the wrong
    /// width, are kept verbatim as `Unknown`.
    pub fn parse(code: u8, data: &[u8]) -> Self {
        match code {
            OPTION_HOSTNAME => Self::Hostname(String::from_utf8_lossy(data).into_owned()),
            OPTION_DOMAIN_NAME => Self::DomainName(String::from_utf8_lossy(data).into_owned()),
            OPTION_REQUESTED_IP if data.len() == 4 => {
                Self::RequestedIpAddress(Ipv4Addr::new(data[0], data[1], data[2], data[3]))
            }
            OPTION_MAX_MESSAGE_SIZE if data.len() == 2 => {
                Self::MaxMessageSize(u16::from_be_bytes([data[0], data[1]]))
            }
            OPTION_VENDOR_CLASS => Self::VendorClass(String::from_utf8_lossy(data).into_owned()),
            OPTION_CLIENT_ID => match MacAddress::from_slice(data) {
                Some(mac) => Self::ClientIdentifier(mac),
                None => Self::Unknown(code, data.to_vec()),
            },
            OPTION_END => Self::End,
            _ => Self::Unknown(code, data.to_vec()),
        }
    }

    /// Map key for this option, `None` for the end marker
    pub fn key(&self) -> Option<OptionKey> {
        match self {
            Self::Hostname(_) => Some(OptionKey::Hostname),
            Self::DomainName(_) => Some(OptionKey::DomainName),
            Self::RequestedIpAddress(_) => Some(OptionKey::RequestedIp),
            Self::MaxMessageSize(_) => Some(OptionKey::MaxMessageSize),
            Self::VendorClass(_) => Some(OptionKey::VendorClass),
            Self::ClientIdentifier(_) => Some(OptionKey::ClientId),
            Self::End => None,
            Self::Unknown(code, _) => Some(OptionKey::Code(*code)),
        }
    }
}

/// Decoded options of one packet, one entry per key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DhcpOptions(HashMap<OptionKey, DhcpOption>);

impl DhcpOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an option, replacing any earlier one with the same key
    ///
    /// The end marker carries no value and is not stored.
    pub fn insert(&mut self, option: DhcpOption) {
        if let Some(key) = option.key() {
            self.0.insert(key, option);
        }
    }

    pub fn get(&self, key: OptionKey) -> Option<&DhcpOption> {
        self.0.get(&key)
    }

    pub fn hostname(&self) -> Option<&str> {
        match self.get(OptionKey::Hostname)? {
            DhcpOption::Hostname(name) => Some(name),
            _ => None,
        }
    }

    pub fn domain_name(&self) -> Option<&str> {
        match self.get(OptionKey::DomainName)? {
            DhcpOption::DomainName(name) => Some(name),
            _ => None,
        }
    }

    pub fn vendor_class(&self) -> Option<&str> {
        match self.get(OptionKey::VendorClass)? {
            DhcpOption::VendorClass(class) => Some(class),
            _ => None,
        }
    }

    pub fn requested_ip(&self) -> Option<Ipv4Addr> {
        match self.get(OptionKey::RequestedIp)? {
            DhcpOption::RequestedIpAddress(ip) => Some(*ip),
            _ => None,
        }
    }

    pub fn max_message_size(&self) -> Option<u16> {
        match self.get(OptionKey::MaxMessageSize)? {
            DhcpOption::MaxMessageSize(size) => Some(*size),
            _ => None,
        }
    }

    pub fn client_id(&self) -> Option<MacAddress> {
        match self.get(OptionKey::ClientId)? {
            DhcpOption::ClientIdentifier(mac) => Some(*mac),
            _ => None,
        }
    }

    /// Raw bytes of an option stored under its numeric code
    pub fn raw(&self, code: u8) -> Option<&[u8]> {
        match self.get(OptionKey::Code(code))? {
            DhcpOption::Unknown(_, data) => Some(data),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &DhcpOption)> {
        self.0.iter()
    }
}
