use std::fmt;
use std::ops::Deref;

use crate::STD_STR_LEN;

/// A display string capped at [`STD_STR_LEN`] bytes.
///
/// Stands in for the fixed character buffers of the wire record: input longer
/// than the capacity is cut at the last whole character that fits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Text(heapless::String<STD_STR_LEN>);

impl Text {
    pub fn new(s: &str) -> Self {
        let mut inner = heapless::String::new();
        for ch in s.chars() {
            if inner.push(ch).is_err() {
                break;
            }
        }
        Self(inner)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Decode a NUL-padded slot. Bytes after the first NUL are ignored and
    /// invalid UTF-8 becomes U+FFFD, cut again at the capacity.
    pub(crate) fn from_wire(slot: &[u8]) -> Self {
        let end = slot.iter().position(|&b| b == 0).unwrap_or(slot.len());
        Self::new(&String::from_utf8_lossy(&slot[..end]))
    }

    /// Copy into a slot, leaving the remainder zeroed.
    pub(crate) fn write_wire(&self, slot: &mut [u8]) {
        let bytes = self.0.as_bytes();
        let n = bytes.len().min(slot.len());
        slot[..n].copy_from_slice(&bytes[..n]);
        slot[n..].fill(0);
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
