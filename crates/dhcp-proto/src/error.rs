use thiserror::Error;

/// Reasons a buffer could not be decoded as a DHCP packet.
///
/// Every variant is local to the packet being decoded: the caller is expected
/// to drop the packet and carry on with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("truncated {field} at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        field: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("bad DHCP magic cookie at offset {offset}: found {found:#010x}")]
    BadMagicCookie { offset: usize, found: u32 },

    #[error("option {code} overruns buffer at offset {offset}: needed {needed} bytes, {available} available")]
    OptionOverrun {
        code: u8,
        offset: usize,
        needed: usize,
        available: usize,
    },
}

pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_message_carries_context() {
        let err = DecodeError::Truncated {
            field: "xid",
            offset: 4,
            needed: 4,
            available: 2,
        };
        assert_eq!(
            err.to_string(),
            "truncated xid at offset 4: needed 4 bytes, 2 available"
        );
    }

    #[test]
    fn test_bad_cookie_message_is_hex() {
        let err = DecodeError::BadMagicCookie {
            offset: 236,
            found: 0,
        };
        assert_eq!(
            err.to_string(),
            "bad DHCP magic cookie at offset 236: found 0x00000000"
        );
    }
}
