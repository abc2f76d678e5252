// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use prost::Message as _;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet,
};

// ============================================================================
// Wire Writer
// ============================================================================

/// Minimal protobuf writer for building test buffers byte by byte.
#[derive(Debug, Default, Clone)]
pub struct WireWriter {
    buf: Vec<u8>,
}

impl WireWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn varint(mut self, mut value: u64) -> Self {
        while value >= 0x80 {
            self.buf.push((value as u8) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
        self
    }

    pub fn tag(self, number: u64, wire_type: u8) -> Self {
        self.varint((number << 3) | u64::from(wire_type))
    }

    pub fn field_varint(self, number: u64, value: u64) -> Self {
        self.tag(number, 0).varint(value)
    }

    pub fn field_sint(self, number: u64, value: i64) -> Self {
        self.field_varint(number, protodec::zigzag_encode(value))
    }

    pub fn field_fixed64(self, number: u64, value: u64) -> Self {
        self.tag(number, 1).raw(&value.to_le_bytes())
    }

    pub fn field_fixed32(self, number: u64, value: u32) -> Self {
        self.tag(number, 5).raw(&value.to_le_bytes())
    }

    pub fn field_bytes(self, number: u64, value: &[u8]) -> Self {
        self.tag(number, 2).varint(value.len() as u64).raw(value)
    }

    pub fn field_message(self, number: u64, message: WireWriter) -> Self {
        self.field_bytes(number, &message.finish())
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

// ============================================================================
// Schema Fixtures
// ============================================================================

pub fn scalar_field(name: &str, number: i32, ty: Type, label: Label) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

pub fn typed_field(
    name: &str,
    number: i32,
    ty: Type,
    type_name: &str,
    label: Label,
) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..scalar_field(name, number, ty, label)
    }
}

pub fn with_default(mut field: FieldDescriptorProto, default: &str) -> FieldDescriptorProto {
    field.default_value = Some(default.to_string());
    field
}

pub fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

pub fn enumeration(name: &str, values: &[(&str, i32)]) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_string()),
        value: values
            .iter()
            .map(|(value, number)| EnumValueDescriptorProto {
                name: Some(value.to_string()),
                number: Some(*number),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

pub fn file(name: &str, messages: Vec<DescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: Some("test".to_string()),
        message_type: messages,
        syntax: Some("proto2".to_string()),
        ..Default::default()
    }
}

pub fn encode_set(files: Vec<FileDescriptorProto>) -> Vec<u8> {
    FileDescriptorSet { file: files }.encode_to_vec()
}

/// `filter.proto`, the schema behind `tests/generated/filter.rs`.
///
/// ```proto
/// enum Mode { SLOW = 0; FAST = 2; }
///
/// message Filter {
///   required int32 id = 1;
///   optional string name = 2;
///   repeated float values = 3;
///   repeated sint64 deltas = 4;
///   optional uint64 limit = 5 [default = 100];
///   optional double ratio = 6 [default = 0.5];
///   optional Mode mode = 7 [default = FAST];
///   optional Range child = 8;
///   repeated Range ranges = 9;
///   optional bytes type = 10 [default = "ab\001"];
/// }
///
/// message Range {
///   required sfixed32 lo = 1;
///   optional fixed64 hi = 2;
///   optional bool open = 3;
///   optional Range next = 4;
/// }
/// ```
pub fn filter_file() -> FileDescriptorProto {
    let filter = message(
        "Filter",
        vec![
            scalar_field("id", 1, Type::Int32, Label::Required),
            scalar_field("name", 2, Type::String, Label::Optional),
            scalar_field("values", 3, Type::Float, Label::Repeated),
            scalar_field("deltas", 4, Type::Sint64, Label::Repeated),
            with_default(scalar_field("limit", 5, Type::Uint64, Label::Optional), "100"),
            with_default(scalar_field("ratio", 6, Type::Double, Label::Optional), "0.5"),
            with_default(
                typed_field("mode", 7, Type::Enum, ".test.Mode", Label::Optional),
                "FAST",
            ),
            typed_field("child", 8, Type::Message, ".test.Range", Label::Optional),
            typed_field("ranges", 9, Type::Message, ".test.Range", Label::Repeated),
            with_default(scalar_field("type", 10, Type::Bytes, Label::Optional), r"ab\001"),
        ],
    );

    let range = message(
        "Range",
        vec![
            scalar_field("lo", 1, Type::Sfixed32, Label::Required),
            scalar_field("hi", 2, Type::Fixed64, Label::Optional),
            scalar_field("open", 3, Type::Bool, Label::Optional),
            typed_field("next", 4, Type::Message, ".test.Range", Label::Optional),
        ],
    );

    FileDescriptorProto {
        enum_type: vec![enumeration("Mode", &[("SLOW", 0), ("FAST", 2)])],
        ..file("filter.proto", vec![filter, range])
    }
}

pub fn filter_schema() -> Vec<u8> {
    encode_set(vec![filter_file()])
}

// ============================================================================
// Files
// ============================================================================

/// Path under the system temp dir, unique to this test process.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("protodec_{}_{}", std::process::id(), name))
}

/// Removes the wrapped file when dropped.
pub struct TempFile(pub PathBuf);

impl TempFile {
    pub fn with_contents(name: &str, contents: &[u8]) -> Self {
        let path = temp_path(name);
        std::fs::write(&path, contents).unwrap();
        Self(path)
    }

    pub fn reserve(name: &str) -> Self {
        let path = temp_path(name);
        let _ = std::fs::remove_file(&path);
        Self(path)
    }

    pub fn path_str(&self) -> String {
        self.0.to_string_lossy().to_string()
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}
