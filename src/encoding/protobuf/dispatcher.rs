// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Field dispatch over a protobuf buffer.
//!
//! [`FieldDispatcher`] walks the tag/value pairs of one message. Message
//! types implement [`DecodeMessage`] by looping over [`FieldDispatcher::next_field`],
//! routing known field numbers to the typed `read_*_field` helpers and
//! skipping everything else:
//!
//! ```
//! use protodec::{DecodeMessage, FieldDispatcher, Result};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: i64,
//!     has_x: bool,
//!     tags: Vec<String>,
//! }
//!
//! impl DecodeMessage for Point {
//!     fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
//!         while let Some(tag) = fields.next_field()? {
//!             match tag.number {
//!                 1 => fields.read_zigzag_field(tag.wire_type, &mut self.x, &mut self.has_x)?,
//!                 2 => fields.read_repeated_bytes_field(tag.wire_type, &mut self.tags)?,
//!                 _ => fields.skip_field(tag.wire_type)?,
//!             }
//!         }
//!         fields.check_required(self.has_x, "Point", "x")
//!     }
//! }
//!
//! let point = Point::decode(&[0x08, 0x03, 0x12, 0x01, b'a']).unwrap();
//! assert_eq!(point.x, -2);
//! assert_eq!(point.tags, vec!["a".to_string()]);
//! ```

use crate::encoding::protobuf::cursor::WireCursor;
use crate::encoding::protobuf::value::{FromBytes, FromFloat, FromInteger, FromZigzag};
use crate::encoding::protobuf::wire::{FieldTag, WireType};
use crate::{CodecError, Result};

/// A message type that can populate itself from a [`FieldDispatcher`].
///
/// This is the contract generated decoders are emitted against.
pub trait DecodeMessage: Default {
    /// Consume every field of the dispatcher's buffer into `self`.
    ///
    /// Implementations check required fields once, after the loop.
    fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()>;

    /// Decode a complete message from `data`.
    fn decode(data: &[u8]) -> Result<Self> {
        let mut message = Self::default();
        message.decode_fields(&mut FieldDispatcher::new(data))?;
        Ok(message)
    }
}

impl<M: DecodeMessage> DecodeMessage for Box<M> {
    fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
        (**self).decode_fields(fields)
    }
}

// `Option<Box<M>>` lets a message hold a singular field of its own type.
impl<M: DecodeMessage> DecodeMessage for Option<M> {
    fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
        self.get_or_insert_with(M::default).decode_fields(fields)
    }
}

/// Iterates the fields of one message buffer.
#[derive(Debug, Clone)]
pub struct FieldDispatcher<'a> {
    cursor: WireCursor<'a>,
}

impl<'a> FieldDispatcher<'a> {
    /// Create a dispatcher over a complete message buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self::from_cursor(WireCursor::new(data))
    }

    /// Create a dispatcher continuing from an existing cursor.
    pub fn from_cursor(cursor: WireCursor<'a>) -> Self {
        Self { cursor }
    }

    /// The underlying cursor.
    pub fn cursor(&self) -> &WireCursor<'a> {
        &self.cursor
    }

    /// Mutable access to the underlying cursor, for custom value reads.
    pub fn cursor_mut(&mut self) -> &mut WireCursor<'a> {
        &mut self.cursor
    }

    /// Whether every field has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_at_end()
    }

    /// Read the next field tag, or `None` once the buffer is exhausted.
    pub fn next_field(&mut self) -> Result<Option<FieldTag>> {
        if self.cursor.is_at_end() {
            return Ok(None);
        }
        let tag_pos = self.cursor.position();
        let raw = self.cursor.read_varint()?;
        FieldTag::from_raw(raw, tag_pos).map(Some)
    }

    /// Consume and discard one value of the given wire type.
    pub fn skip_field(&mut self, wire_type: WireType) -> Result<()> {
        match wire_type {
            WireType::Varint => self.cursor.read_varint().map(|_| ()),
            WireType::Fixed64 => self.cursor.skip(8),
            WireType::Fixed32 => self.cursor.skip(4),
            WireType::LengthDelimited => self.cursor.read_length_delimited().map(|_| ()),
            WireType::StartGroup | WireType::EndGroup => Err(CodecError::unsupported_wire_type(
                wire_type.as_raw(),
                self.cursor.position(),
            )),
        }
    }

    /// Fail with `MissingRequiredField` unless `present` is set.
    pub fn check_required(&self, present: bool, message: &str, field: &str) -> Result<()> {
        if present {
            Ok(())
        } else {
            Err(CodecError::missing_required_field(message, field))
        }
    }

    // Singular fields overwrite the slot and set the presence flag.

    pub fn read_integer_field<T: FromInteger>(
        &mut self,
        wire_type: WireType,
        slot: &mut T,
        present: &mut bool,
    ) -> Result<()> {
        *slot = T::from_integer(self.cursor.decode_integer(wire_type)?);
        *present = true;
        Ok(())
    }

    pub fn read_zigzag_field<T: FromZigzag>(
        &mut self,
        wire_type: WireType,
        slot: &mut T,
        present: &mut bool,
    ) -> Result<()> {
        *slot = T::from_zigzag(self.cursor.decode_zigzag(wire_type)?);
        *present = true;
        Ok(())
    }

    pub fn read_float_field<T: FromFloat>(
        &mut self,
        wire_type: WireType,
        slot: &mut T,
        present: &mut bool,
    ) -> Result<()> {
        *slot = T::from_float(self.cursor.decode_float(wire_type)?);
        *present = true;
        Ok(())
    }

    pub fn read_bytes_field<T: FromBytes>(
        &mut self,
        wire_type: WireType,
        slot: &mut T,
        present: &mut bool,
    ) -> Result<()> {
        let bytes = self.cursor.decode_bytes(wire_type)?;
        *slot = T::from_bytes(bytes, self.cursor.position())?;
        *present = true;
        Ok(())
    }

    pub fn read_message_field<M: DecodeMessage>(
        &mut self,
        wire_type: WireType,
        slot: &mut M,
        present: &mut bool,
    ) -> Result<()> {
        *slot = self.cursor.decode_message(wire_type)?;
        *present = true;
        Ok(())
    }

    // Repeated fields append one element per occurrence. Scalar helpers take
    // the declared element wire type so packed runs can be unpacked.

    pub fn read_repeated_integer_field<T: FromInteger>(
        &mut self,
        wire_type: WireType,
        element: WireType,
        out: &mut Vec<T>,
    ) -> Result<()> {
        self.read_repeated(wire_type, element, out, |cursor, wt| {
            cursor.decode_integer(wt).map(T::from_integer)
        })
    }

    pub fn read_repeated_zigzag_field<T: FromZigzag>(
        &mut self,
        wire_type: WireType,
        element: WireType,
        out: &mut Vec<T>,
    ) -> Result<()> {
        self.read_repeated(wire_type, element, out, |cursor, wt| {
            cursor.decode_zigzag(wt).map(T::from_zigzag)
        })
    }

    pub fn read_repeated_float_field<T: FromFloat>(
        &mut self,
        wire_type: WireType,
        element: WireType,
        out: &mut Vec<T>,
    ) -> Result<()> {
        self.read_repeated(wire_type, element, out, |cursor, wt| {
            cursor.decode_float(wt).map(T::from_float)
        })
    }

    pub fn read_repeated_bytes_field<T: FromBytes>(
        &mut self,
        wire_type: WireType,
        out: &mut Vec<T>,
    ) -> Result<()> {
        let bytes = self.cursor.decode_bytes(wire_type)?;
        out.push(T::from_bytes(bytes, self.cursor.position())?);
        Ok(())
    }

    pub fn read_repeated_message_field<M: DecodeMessage>(
        &mut self,
        wire_type: WireType,
        out: &mut Vec<M>,
    ) -> Result<()> {
        out.push(self.cursor.decode_message(wire_type)?);
        Ok(())
    }

    fn read_repeated<T>(
        &mut self,
        wire_type: WireType,
        element: WireType,
        out: &mut Vec<T>,
        mut decode: impl FnMut(&mut WireCursor<'a>, WireType) -> Result<T>,
    ) -> Result<()> {
        if wire_type == WireType::LengthDelimited && element != WireType::LengthDelimited {
            let payload = self.cursor.read_length_delimited()?;
            let mut packed = WireCursor::new(payload);
            while !packed.is_at_end() {
                out.push(decode(&mut packed, element)?);
            }
        } else {
            out.push(decode(&mut self.cursor, wire_type)?);
        }
        Ok(())
    }
}
