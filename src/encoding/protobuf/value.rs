// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Typed value decoding on top of [`WireCursor`].
//!
//! A value is decoded from a wire type plus a requested [`DecodeDomain`].
//! Incompatible pairs fail with `WireTypeMismatch` before any byte is
//! consumed; group wire types fail with `UnsupportedWireType`.
//!
//! The `From*` traits narrow a decoded 64-bit value into the declared field
//! type. Narrowing truncates silently, as the wire contract allows the wire
//! width and the logical width of a field to differ.

use serde::Serialize;

use crate::encoding::protobuf::cursor::WireCursor;
use crate::encoding::protobuf::dispatcher::{DecodeMessage, FieldDispatcher};
use crate::encoding::protobuf::wire::{zigzag_decode, WireType};
use crate::{CodecError, Result};

/// Value kind requested from the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecodeDomain {
    /// Varint or fixed-width unsigned value
    Integer,
    /// Zigzag varint, or fixed-width value reinterpreted as signed
    Zigzag,
    /// IEEE-754 float from fixed-width bytes
    FloatingPoint,
    /// Length-delimited raw bytes
    ByteSequence,
    /// Length-delimited nested message
    Message,
}

impl DecodeDomain {
    /// Name used in diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            DecodeDomain::Integer => "integer",
            DecodeDomain::Zigzag => "zigzag",
            DecodeDomain::FloatingPoint => "floating-point",
            DecodeDomain::ByteSequence => "byte sequence",
            DecodeDomain::Message => "message",
        }
    }

    /// Infix of the [`FieldDispatcher`] helpers for this domain
    /// (`read_<infix>_field`, `read_repeated_<infix>_field`).
    pub fn helper_infix(self) -> &'static str {
        match self {
            DecodeDomain::Integer => "integer",
            DecodeDomain::Zigzag => "zigzag",
            DecodeDomain::FloatingPoint => "float",
            DecodeDomain::ByteSequence => "bytes",
            DecodeDomain::Message => "message",
        }
    }
}

/// A value decoded without a target type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WireValue<'a> {
    Integer(u64),
    Zigzag(i64),
    Float(f64),
    Bytes(&'a [u8]),
    /// Payload of a nested message, not yet dispatched.
    Message(&'a [u8]),
}

fn mismatch(wire_type: WireType, domain: DecodeDomain, cursor_pos: usize) -> CodecError {
    if wire_type.is_group() {
        CodecError::unsupported_wire_type(wire_type.as_raw(), cursor_pos)
    } else {
        CodecError::wire_type_mismatch(wire_type.as_raw(), domain.as_str(), cursor_pos)
    }
}

impl<'a> WireCursor<'a> {
    /// Decode an unsigned integer: varint, or fixed-width zero-extended.
    pub fn decode_integer(&mut self, wire_type: WireType) -> Result<u64> {
        match wire_type {
            WireType::Varint => self.read_varint(),
            WireType::Fixed64 => self.read_fixed64(),
            WireType::Fixed32 => self.read_fixed32().map(u64::from),
            other => Err(mismatch(other, DecodeDomain::Integer, self.position())),
        }
    }

    /// Decode a signed integer.
    ///
    /// Varints are zigzag-decoded; fixed-width values are reinterpreted as
    /// signed without the zigzag transform.
    pub fn decode_zigzag(&mut self, wire_type: WireType) -> Result<i64> {
        match wire_type {
            WireType::Varint => self.read_varint().map(zigzag_decode),
            WireType::Fixed64 => self.read_fixed64().map(|v| v as i64),
            WireType::Fixed32 => self.read_fixed32().map(|v| i64::from(v as i32)),
            other => Err(mismatch(other, DecodeDomain::Zigzag, self.position())),
        }
    }

    /// Decode a double from 8 bytes or a float from 4 bytes.
    pub fn decode_float(&mut self, wire_type: WireType) -> Result<f64> {
        match wire_type {
            WireType::Fixed64 => self.read_fixed64().map(f64::from_bits),
            WireType::Fixed32 => self.read_fixed32().map(|v| f64::from(f32::from_bits(v))),
            other => Err(mismatch(other, DecodeDomain::FloatingPoint, self.position())),
        }
    }

    /// Decode a length-delimited byte sequence without copying.
    pub fn decode_bytes(&mut self, wire_type: WireType) -> Result<&'a [u8]> {
        match wire_type {
            WireType::LengthDelimited => self.read_length_delimited(),
            other => Err(mismatch(other, DecodeDomain::ByteSequence, self.position())),
        }
    }

    /// Decode a nested message into a fresh instance.
    ///
    /// The nested dispatcher is scoped exactly to the length-delimited
    /// payload, so it can never consume bytes of the enclosing message.
    pub fn decode_message<M: DecodeMessage>(&mut self, wire_type: WireType) -> Result<M> {
        if wire_type != WireType::LengthDelimited {
            return Err(mismatch(wire_type, DecodeDomain::Message, self.position()));
        }
        let payload = self.read_length_delimited()?;

        let mut message = M::default();
        message.decode_fields(&mut FieldDispatcher::new(payload))?;
        Ok(message)
    }

    /// Decode one value of the given domain without a target type.
    pub fn decode_value(
        &mut self,
        domain: DecodeDomain,
        wire_type: WireType,
    ) -> Result<WireValue<'a>> {
        match domain {
            DecodeDomain::Integer => self.decode_integer(wire_type).map(WireValue::Integer),
            DecodeDomain::Zigzag => self.decode_zigzag(wire_type).map(WireValue::Zigzag),
            DecodeDomain::FloatingPoint => self.decode_float(wire_type).map(WireValue::Float),
            DecodeDomain::ByteSequence => self.decode_bytes(wire_type).map(WireValue::Bytes),
            DecodeDomain::Message => {
                if wire_type != WireType::LengthDelimited {
                    return Err(mismatch(wire_type, domain, self.position()));
                }
                self.read_length_delimited().map(WireValue::Message)
            }
        }
    }
}

/// Target of an integer-domain field.
pub trait FromInteger {
    fn from_integer(value: u64) -> Self;
}

/// Target of a zigzag-domain field.
pub trait FromZigzag {
    fn from_zigzag(value: i64) -> Self;
}

/// Target of a floating-point-domain field.
pub trait FromFloat {
    fn from_float(value: f64) -> Self;
}

/// Target of a byte-sequence-domain field.
pub trait FromBytes: Sized {
    /// `end_pos` is the cursor position after the bytes, for diagnostics.
    fn from_bytes(bytes: &[u8], end_pos: usize) -> Result<Self>;
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl FromInteger for $ty {
                #[inline]
                fn from_integer(value: u64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64);

impl FromInteger for bool {
    #[inline]
    fn from_integer(value: u64) -> Self {
        value != 0
    }
}

impl FromZigzag for i32 {
    #[inline]
    fn from_zigzag(value: i64) -> Self {
        value as i32
    }
}

impl FromZigzag for i64 {
    #[inline]
    fn from_zigzag(value: i64) -> Self {
        value
    }
}

impl FromFloat for f32 {
    #[inline]
    fn from_float(value: f64) -> Self {
        value as f32
    }
}

impl FromFloat for f64 {
    #[inline]
    fn from_float(value: f64) -> Self {
        value
    }
}

impl FromBytes for Vec<u8> {
    fn from_bytes(bytes: &[u8], _end_pos: usize) -> Result<Self> {
        Ok(bytes.to_vec())
    }
}

impl FromBytes for String {
    fn from_bytes(bytes: &[u8], end_pos: usize) -> Result<Self> {
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| CodecError::invalid_utf8(end_pos))
    }
}
