use dhcp_proto::{DhcpOptions, DhcpPacket};
use serde::Serialize;

const ANDROID_HOSTNAME_PREFIX: &str = "android-";
const ANDROID_VENDOR_CLASS_PREFIX: &str = "android-dhcp";

/// Verdict on whether a packet came from an Android device
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub is_android: bool,
    pub hostname: Option<String>,
}

/// Classify a decoded packet by its hostname and vendor-class options
pub fn classify(packet: &DhcpPacket) -> Classification {
    classify_options(&packet.options)
}

/// Prefix matches only; the hostname is checked before the vendor class.
pub fn classify_options(options: &DhcpOptions) -> Classification {
    let hostname = options.hostname();

    let is_android = hostname.is_some_and(|name| name.starts_with(ANDROID_HOSTNAME_PREFIX))
        || options
            .vendor_class()
            .is_some_and(|class| class.starts_with(ANDROID_VENDOR_CLASS_PREFIX));

    if !is_android {
        return Classification::default();
    }

    Classification {
        is_android,
        hostname: hostname.map(str::to_string),
    }
}
