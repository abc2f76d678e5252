// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire types and field tags of the protobuf binary encoding.
//!
//! A field on the wire starts with a varint tag whose low 3 bits are the
//! [`WireType`] and whose remaining bits are the field number.

use std::fmt;

use serde::Serialize;

use crate::{CodecError, Result};

/// Maximum number of base-128 groups in a varint (`ceil(64 / 7)`).
pub const MAX_VARINT_LEN: usize = 10;

/// Physical encoding of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum WireType {
    /// Variable length integer: int32, int64, uint32, uint64, sint32, sint64, bool, enum.
    Varint = 0,
    /// 8 little-endian bytes: fixed64, sfixed64, double.
    Fixed64 = 1,
    /// Varint length followed by raw bytes: string, bytes, messages, packed repeated fields.
    LengthDelimited = 2,
    /// Group start (deprecated, never decodable).
    StartGroup = 3,
    /// Group end (deprecated, never decodable).
    EndGroup = 4,
    /// 4 little-endian bytes: fixed32, sfixed32, float.
    Fixed32 = 5,
}

impl WireType {
    /// Interpret the low 3 bits of a tag.
    ///
    /// Values 6 and 7 are not wire types and fail with `UnsupportedWireType`.
    pub fn from_raw(raw: u8, cursor_pos: usize) -> Result<Self> {
        match raw {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            3 => Ok(WireType::StartGroup),
            4 => Ok(WireType::EndGroup),
            5 => Ok(WireType::Fixed32),
            other => Err(CodecError::unsupported_wire_type(other, cursor_pos)),
        }
    }

    /// Raw 3-bit value.
    #[inline]
    pub fn as_raw(self) -> u8 {
        self as u8
    }

    /// Whether this is one of the deprecated group markers.
    #[inline]
    pub fn is_group(self) -> bool {
        matches!(self, WireType::StartGroup | WireType::EndGroup)
    }

    /// Name used in diagnostics and dumps.
    pub fn as_str(self) -> &'static str {
        match self {
            WireType::Varint => "varint",
            WireType::Fixed64 => "fixed64",
            WireType::LengthDelimited => "length-delimited",
            WireType::StartGroup => "start-group",
            WireType::EndGroup => "end-group",
            WireType::Fixed32 => "fixed32",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded field key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTag {
    /// Field number within the enclosing message.
    pub number: u64,
    /// How the value following the tag is encoded.
    pub wire_type: WireType,
}

impl FieldTag {
    /// Split a raw tag varint into field number and wire type.
    pub fn from_raw(value: u64, cursor_pos: usize) -> Result<Self> {
        Ok(Self {
            number: value >> 3,
            wire_type: WireType::from_raw((value & 7) as u8, cursor_pos)?,
        })
    }
}

/// Map a signed value onto the unsigned zigzag space.
#[inline]
pub fn zigzag_encode(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Invert [`zigzag_encode`].
#[inline]
pub fn zigzag_decode(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}
