// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Schema-less protobuf decoder.
//!
//! Walks any protobuf buffer and reports each field as it appears on the
//! wire. Without a schema the decoder:
//! - Cannot resolve field names (uses field numbers)
//! - Cannot distinguish between varint types (int32, uint32, bool, enum)
//! - Guesses whether a length-delimited payload is text, a nested message,
//!   or raw bytes
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use protodec::encoding::protobuf::{ProtobufDecoder, RawValue};
//!
//! let decoder = ProtobufDecoder::new();
//! let fields = decoder.decode(&[0x08, 0x2A])?;
//! assert_eq!(fields[0].number, 1);
//! assert_eq!(fields[0].value, RawValue::Varint(42));
//! # Ok(())
//! # }
//! ```

use serde::{Serialize, Serializer};

use crate::encoding::protobuf::dispatcher::FieldDispatcher;
use crate::encoding::protobuf::wire::WireType;
use crate::{CodecError, Result};

/// Nesting depth up to which payloads are tried as messages.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// One field as found on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawField {
    pub number: u64,
    pub wire_type: WireType,
    /// Offset of the value (after the tag) within its enclosing buffer
    #[serde(skip)]
    pub offset: usize,
    #[serde(flatten)]
    pub value: RawValue,
}

/// Field value as far as it can be interpreted without a schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum RawValue {
    Varint(u64),
    Fixed64(u64),
    Fixed32(u32),
    String(String),
    Bytes(#[serde(serialize_with = "serialize_hex")] Vec<u8>),
    Message(Vec<RawField>),
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// Schema-less decoder producing [`RawField`] trees.
#[derive(Debug, Clone)]
pub struct ProtobufDecoder {
    max_depth: usize,
}

impl ProtobufDecoder {
    /// Create a decoder with the default nesting limit.
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deep length-delimited payloads are tried as messages.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Decode every field of `data`.
    ///
    /// Fails on the same malformed input the typed decoders reject
    /// (truncation, varint overflow, group or invalid wire types).
    pub fn decode(&self, data: &[u8]) -> Result<Vec<RawField>> {
        self.decode_at_depth(data, 0)
    }

    fn decode_at_depth(&self, data: &[u8], depth: usize) -> Result<Vec<RawField>> {
        let mut fields = FieldDispatcher::new(data);
        let mut result = Vec::new();

        while let Some(tag) = fields.next_field()? {
            let offset = fields.cursor().position();
            let cursor = fields.cursor_mut();

            let value = match tag.wire_type {
                WireType::Varint => RawValue::Varint(cursor.read_varint()?),
                WireType::Fixed64 => RawValue::Fixed64(cursor.read_fixed64()?),
                WireType::Fixed32 => RawValue::Fixed32(cursor.read_fixed32()?),
                WireType::LengthDelimited => {
                    let payload = cursor.decode_bytes(tag.wire_type)?;
                    self.interpret_payload(payload, depth)
                }
                WireType::StartGroup | WireType::EndGroup => {
                    return Err(CodecError::unsupported_wire_type(
                        tag.wire_type.as_raw(),
                        offset,
                    ));
                }
            };

            result.push(RawField {
                number: tag.number,
                wire_type: tag.wire_type,
                offset,
                value,
            });
        }

        Ok(result)
    }

    fn interpret_payload(&self, payload: &[u8], depth: usize) -> RawValue {
        if let Ok(text) = std::str::from_utf8(payload) {
            if is_printable(text) {
                return RawValue::String(text.to_string());
            }
        }

        if !payload.is_empty() && depth < self.max_depth {
            if let Ok(nested) = self.decode_at_depth(payload, depth + 1) {
                return RawValue::Message(nested);
            }
        }

        RawValue::Bytes(payload.to_vec())
    }
}

impl Default for ProtobufDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn is_printable(text: &str) -> bool {
    text.chars()
        .all(|c| !c.is_control() || matches!(c, '\n' | '\r' | '\t'))
}
