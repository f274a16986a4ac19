use crate::error::{DecodeError, Result};
use std::net::Ipv4Addr;

/// Bounded big-endian cursor over a captured buffer.
///
/// A failed read leaves the position untouched.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Start reading `buf` at `offset`
    pub fn new(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, pos: offset }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take `n` bytes, naming `field` in the error if they are not there
    pub fn bytes(&mut self, field: &'static str, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(DecodeError::Truncated {
                field,
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let start = self.pos.min(self.buf.len());
        self.pos += n;
        Ok(&self.buf[start..start + n])
    }

    pub fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.bytes(field, N)?);
        Ok(out)
    }

    pub fn u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.bytes(field, 1)?[0])
    }

    pub fn u16(&mut self, field: &'static str) -> Result<u16> {
        Ok(u16::from_be_bytes(self.array(field)?))
    }

    pub fn u32(&mut self, field: &'static str) -> Result<u32> {
        Ok(u32::from_be_bytes(self.array(field)?))
    }

    /// IPv4 address stored as 4 octets in network order
    pub fn ipv4(&mut self, field: &'static str) -> Result<Ipv4Addr> {
        Ok(Ipv4Addr::from(self.array::<4>(field)?))
    }
}
