//! Fixed-layout record codec.
//!
//! Records follow the engine's natural C layout in native byte order (both
//! ends of the queue run on the same machine). `u32`/`i32` take 4 bytes on a
//! 4-byte boundary, `bool` takes 1, and a text slot takes [`STD_STR_LEN`]
//! NUL-padded bytes. Every list array is [`LIST_MAX_ITEMS`] slots long
//! regardless of how many are populated. A payload holding a 4-byte field is
//! padded to a multiple of 4.

use std::fmt;

use crate::text::Text;
use crate::{LIST_MAX_ITEMS, STD_STR_LEN};

pub(crate) const U32_SIZE: usize = 4;
pub(crate) const BOOL_SIZE: usize = 1;
pub(crate) const TEXT_SIZE: usize = STD_STR_LEN;
pub(crate) const TEXT_ARRAY_SIZE: usize = TEXT_SIZE * LIST_MAX_ITEMS;
pub(crate) const BOOL_ARRAY_SIZE: usize = BOOL_SIZE * LIST_MAX_ITEMS;

/// Round `offset` up to the next 4-byte boundary.
pub(crate) const fn align4(offset: usize) -> usize {
    (offset + U32_SIZE - 1) & !(U32_SIZE - 1)
}

/// Errors that can occur while decoding a received record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Record length does not match the fixed record size
    WrongLength { expected: usize, actual: usize },
    /// Tag does not name a known envelope kind
    UnknownKind(u32),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::WrongLength { expected, actual } => {
                write!(f, "record is {} bytes, expected {}", actual, expected)
            }
            DecodeError::UnknownKind(tag) => write!(f, "unknown envelope kind {}", tag),
        }
    }
}

impl std::error::Error for DecodeError {}

/// A payload with a fixed position-independent layout.
pub(crate) trait WirePayload: Sized {
    const WIRE_SIZE: usize;

    fn write_to(&self, w: &mut WireWriter<'_>);
    fn read_from(r: &mut WireReader<'_>) -> Self;
}

/// Sequential writer over a zeroed record buffer.
///
/// Writes past the end are dropped; callers size the buffer from `WIRE_SIZE`.
pub(crate) struct WireWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WireWriter<'a> {
    pub(crate) fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn slot(&mut self, len: usize) -> Option<&mut [u8]> {
        let start = self.pos;
        self.pos += len;
        self.buf.get_mut(start..start + len)
    }

    fn word(&mut self) -> Option<&mut [u8]> {
        self.pos = align4(self.pos);
        self.slot(U32_SIZE)
    }

    pub(crate) fn u32(&mut self, value: u32) {
        if let Some(dst) = self.word() {
            dst.copy_from_slice(&value.to_ne_bytes());
        }
    }

    pub(crate) fn i32(&mut self, value: i32) {
        if let Some(dst) = self.word() {
            dst.copy_from_slice(&value.to_ne_bytes());
        }
    }

    pub(crate) fn bool(&mut self, value: bool) {
        if let Some(dst) = self.slot(BOOL_SIZE) {
            dst[0] = value as u8;
        }
    }

    pub(crate) fn text(&mut self, value: &Text) {
        if let Some(dst) = self.slot(TEXT_SIZE) {
            value.write_wire(dst);
        }
    }

    /// Write a full `LIST_MAX_ITEMS` text array; unused slots stay zeroed.
    pub(crate) fn text_array<'t>(&mut self, values: impl Iterator<Item = &'t Text>) {
        if let Some(dst) = self.slot(TEXT_ARRAY_SIZE) {
            for (chunk, value) in dst.chunks_exact_mut(TEXT_SIZE).zip(values) {
                value.write_wire(chunk);
            }
        }
    }

    /// Write a full `LIST_MAX_ITEMS` flag array; unused slots stay false.
    pub(crate) fn bool_array(&mut self, values: impl Iterator<Item = bool>) {
        if let Some(dst) = self.slot(BOOL_ARRAY_SIZE) {
            for (byte, value) in dst.iter_mut().zip(values) {
                *byte = value as u8;
            }
        }
    }
}

/// Sequential reader over a record of known length.
///
/// Reads past the end yield zero values; length is validated before a reader
/// is ever constructed.
pub(crate) struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn slot(&mut self, len: usize) -> Option<&'a [u8]> {
        let start = self.pos;
        self.pos += len;
        self.buf.get(start..start + len)
    }

    fn word(&mut self) -> Option<&'a [u8]> {
        self.pos = align4(self.pos);
        self.slot(U32_SIZE)
    }

    pub(crate) fn u32(&mut self) -> u32 {
        self.word()
            .and_then(|b| b.try_into().ok())
            .map(u32::from_ne_bytes)
            .unwrap_or(0)
    }

    pub(crate) fn i32(&mut self) -> i32 {
        self.word()
            .and_then(|b| b.try_into().ok())
            .map(i32::from_ne_bytes)
            .unwrap_or(0)
    }

    pub(crate) fn bool(&mut self) -> bool {
        self.slot(BOOL_SIZE).map(|b| b[0] != 0).unwrap_or(false)
    }

    pub(crate) fn text(&mut self) -> Text {
        self.slot(TEXT_SIZE).map(Text::from_wire).unwrap_or_default()
    }

    /// Read a text array, keeping only the first `count` populated slots.
    pub(crate) fn text_array(&mut self, count: usize) -> Vec<Text> {
        match self.slot(TEXT_ARRAY_SIZE) {
            Some(src) => src
                .chunks_exact(TEXT_SIZE)
                .take(count)
                .map(Text::from_wire)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Read a flag array, keeping only the first `count` populated slots.
    pub(crate) fn bool_array(&mut self, count: usize) -> Vec<bool> {
        match self.slot(BOOL_ARRAY_SIZE) {
            Some(src) => src.iter().take(count).map(|&b| b != 0).collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_drops_overflowing_fields() {
        let mut buf = [0u8; 6];
        let mut w = WireWriter::new(&mut buf);
        w.u32(7);
        w.u32(9); // does not fit
        w.bool(true); // position already past the end
        assert_eq!(&buf[..4], &7u32.to_ne_bytes());
        assert_eq!(&buf[4..], &[0, 0]);
    }

    #[test]
    fn reader_yields_zero_past_end() {
        let buf = 5u32.to_ne_bytes();
        let mut r = WireReader::new(&buf);
        assert_eq!(r.u32(), 5);
        assert_eq!(r.u32(), 0);
        assert!(!r.bool());
        assert!(r.text().is_empty());
    }

    #[test]
    fn words_land_on_four_byte_boundaries() {
        let mut buf = [0u8; 12];
        {
            let mut w = WireWriter::new(&mut buf);
            w.bool(true);
            w.u32(0xAABB_CCDD);
            w.bool(true);
            w.i32(-2);
        }
        assert_eq!(&buf[..4], &[1, 0, 0, 0]);
        assert_eq!(&buf[4..8], &0xAABB_CCDDu32.to_ne_bytes());
        assert_eq!(buf[8], 1);

        let mut r = WireReader::new(&buf);
        assert!(r.bool());
        assert_eq!(r.u32(), 0xAABB_CCDD);
        assert!(r.bool());
        // No room left for the second word after padding.
        assert_eq!(r.i32(), 0);
    }

    #[test]
    fn align4_rounds_up() {
        assert_eq!(align4(0), 0);
        assert_eq!(align4(41), 44);
        assert_eq!(align4(44), 44);
        assert_eq!(align4(5545), 5548);
    }

    #[test]
    fn arrays_keep_only_populated_prefix() {
        let mut buf = vec![0u8; TEXT_ARRAY_SIZE + BOOL_ARRAY_SIZE];
        let labels = [Text::new("one"), Text::new("two"), Text::new("three")];
        {
            let mut w = WireWriter::new(&mut buf);
            w.text_array(labels.iter());
            w.bool_array([true, false, true].into_iter());
        }
        let mut r = WireReader::new(&buf);
        let texts = r.text_array(2);
        assert_eq!(texts, vec![Text::new("one"), Text::new("two")]);
        assert_eq!(r.bool_array(3), vec![true, false, true]);
    }
}
