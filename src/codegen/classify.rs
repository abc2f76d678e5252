// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Per-field classification.
//!
//! Maps one [`FieldDescriptorProto`] to everything the emitter needs: the
//! decode domain, the Rust target type, the repeated/required strategy and
//! the default value text. Classification is pure; it never looks at other
//! fields or messages.

use serde::Serialize;

use crate::encoding::protobuf::{DecodeDomain, WireType};
use crate::schema::{FieldDescriptorProto, FieldType, Label};
use crate::{CodecError, Result};

/// Classification of one schema field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldEmission {
    pub name: String,
    pub number: i32,
    pub field_type: FieldType,
    pub decode_domain: DecodeDomain,
    /// Element type, without the `Vec<..>` of repeated fields
    pub target_type_name: String,
    pub is_repeated: bool,
    pub is_required: bool,
    /// Default as a Rust expression fragment, present only for singular
    /// fields with an explicit default.
    pub default_text: Option<String>,
    /// Wire type of one element, used to unpack packed runs
    pub wire_type: WireType,
    /// Singular message field on a reference cycle, stored as `Option<Box<T>>`.
    /// Set by [`Generator::plan`](crate::codegen::Generator::plan).
    pub is_boxed: bool,
}

impl FieldEmission {
    /// Whether the emitted struct carries a `has_<name>` flag for this field.
    pub fn has_presence(&self) -> bool {
        !self.is_repeated
    }
}

/// Decode domain of a declared type, `None` for groups.
pub fn decode_domain(field_type: FieldType) -> Option<DecodeDomain> {
    Some(match field_type {
        FieldType::Double | FieldType::Float => DecodeDomain::FloatingPoint,
        FieldType::Sint32 | FieldType::Sint64 => DecodeDomain::Zigzag,
        FieldType::String | FieldType::Bytes => DecodeDomain::ByteSequence,
        FieldType::Message => DecodeDomain::Message,
        FieldType::Group => return None,
        FieldType::Int32
        | FieldType::Int64
        | FieldType::Uint32
        | FieldType::Uint64
        | FieldType::Fixed32
        | FieldType::Fixed64
        | FieldType::Sfixed32
        | FieldType::Sfixed64
        | FieldType::Bool
        | FieldType::Enum => DecodeDomain::Integer,
    })
}

/// Rust type for scalar declared types. Messages and groups have none.
pub fn scalar_type_name(field_type: FieldType) -> Option<&'static str> {
    Some(match field_type {
        FieldType::Int32 | FieldType::Sint32 | FieldType::Sfixed32 => "i32",
        FieldType::Int64 | FieldType::Sint64 | FieldType::Sfixed64 => "i64",
        FieldType::Uint32 | FieldType::Fixed32 => "u32",
        FieldType::Uint64 | FieldType::Fixed64 => "u64",
        FieldType::Double => "f64",
        FieldType::Float => "f32",
        FieldType::Bool => "bool",
        FieldType::Enum => "i32",
        FieldType::String => "String",
        FieldType::Bytes => "Vec<u8>",
        FieldType::Message | FieldType::Group => return None,
    })
}

/// Classify `field` of the message named `message`.
pub fn classify_field(message: &str, field: &FieldDescriptorProto) -> Result<FieldEmission> {
    let unsupported =
        |construct: String| CodecError::unsupported_schema_construct(message, &field.name, construct);

    let field_type = field
        .kind()
        .ok_or_else(|| unsupported(format!("unknown field type {}", field.field_type)))?;

    if field_type == FieldType::Group {
        return Err(unsupported("group field".to_string()));
    }

    let (decode_domain, wire_type) = match (decode_domain(field_type), field_type.wire_type()) {
        (Some(domain), Some(wire_type)) => (domain, wire_type),
        _ => return Err(unsupported(format!("{} field", field_type.as_str()))),
    };

    let target_type_name = match scalar_type_name(field_type) {
        Some(name) => name.to_string(),
        None => field
            .type_simple_name()
            .ok_or_else(|| unsupported("message field without type name".to_string()))?
            .to_string(),
    };

    let label = field.label_kind();
    let is_repeated = label == Label::Repeated;

    let default_text = if !is_repeated && field.has_default_value {
        Some(default_text(field_type, &field.default_value))
    } else {
        None
    };

    Ok(FieldEmission {
        name: field.name.clone(),
        number: field.number,
        field_type,
        decode_domain,
        target_type_name,
        is_repeated,
        is_required: label == Label::Required,
        default_text,
        wire_type,
        is_boxed: false,
    })
}

/// Byte-sequence defaults are quoted as Rust literals; everything else is
/// kept as written in the schema.
fn default_text(field_type: FieldType, value: &str) -> String {
    match field_type {
        FieldType::String => format!("{value:?}"),
        FieldType::Bytes => byte_string_literal(&unescape_c(value)),
        _ => value.to_string(),
    }
}

/// Render raw bytes as a `b"..."` literal.
fn byte_string_literal(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push_str("b\"");
    for &b in bytes {
        out.extend(std::ascii::escape_default(b).map(char::from));
    }
    out.push('"');
    out
}

/// Undo the C escaping descriptors use for `bytes` defaults.
fn unescape_c(text: &str) -> Vec<u8> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' || i + 1 == bytes.len() {
            out.push(bytes[i]);
            i += 1;
            continue;
        }

        i += 1;
        match bytes[i] {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'a' => out.push(0x07),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'v' => out.push(0x0B),
            b'0'..=b'7' => {
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 3 && i < bytes.len() && (b'0'..=b'7').contains(&bytes[i]) {
                    value = value * 8 + u32::from(bytes[i] - b'0');
                    i += 1;
                    digits += 1;
                }
                out.push(value as u8);
                continue;
            }
            b'x' => {
                i += 1;
                let mut value = 0u32;
                let mut digits = 0;
                while digits < 2 && i < bytes.len() {
                    match char::from(bytes[i]).to_digit(16) {
                        Some(d) => value = value * 16 + d,
                        None => break,
                    }
                    i += 1;
                    digits += 1;
                }
                out.push(if digits == 0 { b'x' } else { value as u8 });
                continue;
            }
            other => out.push(other),
        }
        i += 1;
    }

    out
}
