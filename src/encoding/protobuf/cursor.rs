// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire cursor for reading protobuf-encoded data.
//!
//! The cursor owns a borrowed byte range and a read position that only moves
//! forward. Every primitive read is bounds-checked and atomic: a read that
//! fails leaves the position where it was.

use byteorder::{ByteOrder, LittleEndian};

use crate::encoding::protobuf::wire::MAX_VARINT_LEN;
use crate::{CodecError, Result};

/// Bounds-checked reader over a borrowed protobuf buffer.
///
/// # Example
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use protodec::encoding::protobuf::WireCursor;
///
/// let data = [0xAC, 0x02, 0x2A, 0x00, 0x00, 0x00];
/// let mut cursor = WireCursor::new(&data);
/// assert_eq!(cursor.read_varint()?, 300);
/// assert_eq!(cursor.read_fixed32()?, 42);
/// assert!(cursor.is_at_end());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WireCursor<'a> {
    /// The data buffer
    data: &'a [u8],
    /// Current read position
    offset: usize,
}

impl<'a> WireCursor<'a> {
    /// Create a cursor positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Get the current position relative to the data start.
    #[inline]
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Get the remaining bytes available to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Check if at end of buffer.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.offset == self.data.len()
    }

    /// The unread part of the buffer.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    /// Read a base-128 varint.
    ///
    /// Fails with `Truncated` when the buffer ends before the terminating byte
    /// and with `VarintOverflow` when more than 10 groups would be consumed.
    pub fn read_varint(&mut self) -> Result<u64> {
        let start = self.offset;
        let mut value: u64 = 0;

        for i in 0..MAX_VARINT_LEN {
            let pos = start + i;
            let byte = match self.data.get(pos) {
                Some(byte) => *byte,
                None => return Err(CodecError::truncated(1, 0, pos)),
            };

            value |= u64::from(byte & 0x7F) << (7 * i);

            if byte & 0x80 == 0 {
                self.offset = pos + 1;
                return Ok(value);
            }
        }

        Err(CodecError::varint_overflow(start))
    }

    /// Read 4 little-endian bytes.
    pub fn read_fixed32(&mut self) -> Result<u32> {
        let bytes = self.take_slice(4)?;
        Ok(LittleEndian::read_u32(bytes))
    }

    /// Read 8 little-endian bytes.
    pub fn read_fixed64(&mut self) -> Result<u64> {
        let bytes = self.take_slice(8)?;
        Ok(LittleEndian::read_u64(bytes))
    }

    /// Consume `len` bytes and return them without copying.
    pub fn take_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::truncated(len, self.remaining(), self.offset));
        }
        let start = self.offset;
        self.offset += len;
        Ok(&self.data[start..self.offset])
    }

    /// Read a varint length prefix and consume that many bytes.
    ///
    /// The length is untrusted: it is checked against the remaining bytes
    /// before anything is sliced, and the cursor is restored on failure.
    pub fn read_length_delimited(&mut self) -> Result<&'a [u8]> {
        let start = self.offset;
        let len = self.read_varint()?;
        let len = usize::try_from(len).unwrap_or(usize::MAX);

        match self.take_slice(len) {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                self.offset = start;
                Err(e)
            }
        }
    }

    /// Skip bytes.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take_slice(count).map(|_| ())
    }
}
