// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Compiled schema entities from `google/protobuf/descriptor.proto`.
//!
//! Only the subset the generator consumes is modelled. Each entity decodes
//! itself through the same [`FieldDispatcher`] helpers that generated code
//! uses, with a fixed mapping from field number to slot. Fields outside the
//! mapping (options, source info, oneofs, extensions, ...) are skipped.
//!
//! Nested message declarations are not walked; [`DescriptorProto`] only
//! counts them.

use crate::encoding::protobuf::{DecodeMessage, FieldDispatcher};
use crate::schema::field_type::{FieldType, Label};
use crate::Result;

/// `FileDescriptorSet`: the output of `protoc --descriptor_set_out`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileDescriptorSet {
    pub file: Vec<FileDescriptorProto>,
}

impl DecodeMessage for FileDescriptorSet {
    fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
        while let Some(tag) = fields.next_field()? {
            match tag.number {
                1 => fields.read_repeated_message_field(tag.wire_type, &mut self.file)?,
                _ => fields.skip_field(tag.wire_type)?,
            }
        }
        Ok(())
    }
}

/// One `.proto` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileDescriptorProto {
    pub name: String,
    pub package: String,
    pub message_type: Vec<DescriptorProto>,
    pub enum_type: Vec<EnumDescriptorProto>,
    pub syntax: String,

    pub has_name: bool,
    pub has_package: bool,
    pub has_syntax: bool,
}

impl DecodeMessage for FileDescriptorProto {
    fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
        while let Some(tag) = fields.next_field()? {
            match tag.number {
                1 => fields.read_bytes_field(tag.wire_type, &mut self.name, &mut self.has_name)?,
                2 => fields.read_bytes_field(
                    tag.wire_type,
                    &mut self.package,
                    &mut self.has_package,
                )?,
                4 => fields.read_repeated_message_field(tag.wire_type, &mut self.message_type)?,
                5 => fields.read_repeated_message_field(tag.wire_type, &mut self.enum_type)?,
                12 => fields.read_bytes_field(
                    tag.wire_type,
                    &mut self.syntax,
                    &mut self.has_syntax,
                )?,
                _ => fields.skip_field(tag.wire_type)?,
            }
        }
        Ok(())
    }
}

impl FileDescriptorProto {
    /// Find an enum by the fully qualified name fields refer to it with:
    /// `.pkg.Enum` for top-level enums, `.pkg.Msg.Enum` for message-scoped ones.
    pub fn find_enum(&self, type_name: &str) -> Option<&EnumDescriptorProto> {
        let local = if self.package.is_empty() {
            type_name.strip_prefix('.')?
        } else {
            type_name
                .strip_prefix('.')?
                .strip_prefix(self.package.as_str())?
                .strip_prefix('.')?
        };

        let (scope, name) = match local.split_once('.') {
            Some((message, name)) => {
                let message = self.message_type.iter().find(|m| m.name == message)?;
                (message.enum_type.as_slice(), name)
            }
            None => (self.enum_type.as_slice(), local),
        };
        scope.iter().find(|e| e.name == name)
    }
}

/// A message type declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DescriptorProto {
    pub name: String,
    pub field: Vec<FieldDescriptorProto>,
    pub enum_type: Vec<EnumDescriptorProto>,
    /// Nested message declarations seen on the wire and skipped.
    pub skipped_nested_types: usize,

    pub has_name: bool,
}

impl DecodeMessage for DescriptorProto {
    fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
        while let Some(tag) = fields.next_field()? {
            match tag.number {
                1 => fields.read_bytes_field(tag.wire_type, &mut self.name, &mut self.has_name)?,
                2 => fields.read_repeated_message_field(tag.wire_type, &mut self.field)?,
                3 => {
                    fields.skip_field(tag.wire_type)?;
                    self.skipped_nested_types += 1;
                }
                4 => fields.read_repeated_message_field(tag.wire_type, &mut self.enum_type)?,
                _ => fields.skip_field(tag.wire_type)?,
            }
        }
        Ok(())
    }
}

/// A field declaration within a message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDescriptorProto {
    pub name: String,
    pub number: i32,
    /// Raw [`Label`] value
    pub label: i32,
    /// Raw [`FieldType`] value
    pub field_type: i32,
    /// Fully qualified referenced type for message and enum fields, e.g. `.pkg.Msg`
    pub type_name: String,
    /// Default value as written in the schema (strings unquoted)
    pub default_value: String,

    pub has_name: bool,
    pub has_number: bool,
    pub has_label: bool,
    pub has_field_type: bool,
    pub has_type_name: bool,
    pub has_default_value: bool,
}

impl DecodeMessage for FieldDescriptorProto {
    fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
        while let Some(tag) = fields.next_field()? {
            match tag.number {
                1 => fields.read_bytes_field(tag.wire_type, &mut self.name, &mut self.has_name)?,
                3 => fields.read_integer_field(
                    tag.wire_type,
                    &mut self.number,
                    &mut self.has_number,
                )?,
                4 => fields.read_integer_field(
                    tag.wire_type,
                    &mut self.label,
                    &mut self.has_label,
                )?,
                5 => fields.read_integer_field(
                    tag.wire_type,
                    &mut self.field_type,
                    &mut self.has_field_type,
                )?,
                6 => fields.read_bytes_field(
                    tag.wire_type,
                    &mut self.type_name,
                    &mut self.has_type_name,
                )?,
                7 => fields.read_bytes_field(
                    tag.wire_type,
                    &mut self.default_value,
                    &mut self.has_default_value,
                )?,
                _ => fields.skip_field(tag.wire_type)?,
            }
        }
        Ok(())
    }
}

impl FieldDescriptorProto {
    /// Declared type, `None` when missing or outside the known range.
    pub fn kind(&self) -> Option<FieldType> {
        FieldType::from_i32(self.field_type)
    }

    /// Declared label.
    pub fn label_kind(&self) -> Label {
        Label::from_i32(self.label)
    }

    /// Last segment of [`type_name`](Self::type_name), e.g. `Msg` for `.pkg.Msg`.
    pub fn type_simple_name(&self) -> Option<&str> {
        if !self.has_type_name || self.type_name.is_empty() {
            return None;
        }
        self.type_name.rsplit('.').next().filter(|s| !s.is_empty())
    }
}

/// An enum declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumDescriptorProto {
    pub name: String,
    pub value: Vec<EnumValueDescriptorProto>,

    pub has_name: bool,
}

impl DecodeMessage for EnumDescriptorProto {
    fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
        while let Some(tag) = fields.next_field()? {
            match tag.number {
                1 => fields.read_bytes_field(tag.wire_type, &mut self.name, &mut self.has_name)?,
                2 => fields.read_repeated_message_field(tag.wire_type, &mut self.value)?,
                _ => fields.skip_field(tag.wire_type)?,
            }
        }
        Ok(())
    }
}

impl EnumDescriptorProto {
    /// Numeric value of the named enum constant.
    pub fn value_number(&self, value_name: &str) -> Option<i32> {
        self.value
            .iter()
            .find(|v| v.name == value_name)
            .map(|v| v.number)
    }
}

/// One constant of an enum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnumValueDescriptorProto {
    pub name: String,
    pub number: i32,

    pub has_name: bool,
    pub has_number: bool,
}

impl DecodeMessage for EnumValueDescriptorProto {
    fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
        while let Some(tag) = fields.next_field()? {
            match tag.number {
                1 => fields.read_bytes_field(tag.wire_type, &mut self.name, &mut self.has_name)?,
                2 => fields.read_integer_field(
                    tag.wire_type,
                    &mut self.number,
                    &mut self.has_number,
                )?,
                _ => fields.skip_field(tag.wire_type)?,
            }
        }
        Ok(())
    }
}

/// Decode a serialized `FileDescriptorSet`.
pub fn decode_file_descriptor_set(data: &[u8]) -> Result<FileDescriptorSet> {
    let set = FileDescriptorSet::decode(data)?;

    tracing::debug!(
        files = set.file.len(),
        messages = set.file.iter().map(|f| f.message_type.len()).sum::<usize>(),
        bytes = data.len(),
        "Decoded FileDescriptorSet"
    );

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    // field 1 "id", number 1, label required, type int32
    const ID_FIELD: &[u8] = &[
        0x0A, 0x02, b'i', b'd', 0x18, 0x01, 0x20, 0x02, 0x28, 0x05,
    ];

    fn message_with_field(name: &[u8], field: &[u8]) -> Vec<u8> {
        let mut out = vec![0x0A, name.len() as u8];
        out.extend_from_slice(name);
        out.push(0x12);
        out.push(field.len() as u8);
        out.extend_from_slice(field);
        out
    }

    #[test]
    fn test_decode_field_descriptor() {
        let field = FieldDescriptorProto::decode(ID_FIELD).unwrap();
        assert_eq!(field.name, "id");
        assert_eq!(field.number, 1);
        assert_eq!(field.label_kind(), Label::Required);
        assert_eq!(field.kind(), Some(FieldType::Int32));
        assert!(field.has_name && field.has_number && field.has_label && field.has_field_type);
        assert!(!field.has_default_value);
        assert_eq!(field.type_simple_name(), None);
    }

    #[test]
    fn test_decode_field_default_and_type_name() {
        let mut data = vec![0x32, 0x08];
        data.extend_from_slice(b".pkg.Sub");
        data.extend_from_slice(&[0x3A, 0x02, b'4', b'2']);
        let field = FieldDescriptorProto::decode(&data).unwrap();
        assert_eq!(field.type_simple_name(), Some("Sub"));
        assert!(field.has_default_value);
        assert_eq!(field.default_value, "42");
    }

    #[test]
    fn test_decode_message_descriptor_counts_nested_types() {
        let mut data = message_with_field(b"Msg", ID_FIELD);
        // nested_type = { name: "Inner" }
        data.extend_from_slice(&[0x1A, 0x07, 0x0A, 0x05]);
        data.extend_from_slice(b"Inner");

        let message = DescriptorProto::decode(&data).unwrap();
        assert_eq!(message.name, "Msg");
        assert_eq!(message.field.len(), 1);
        assert_eq!(message.field[0].name, "id");
        assert_eq!(message.skipped_nested_types, 1);
    }

    #[test]
    fn test_decode_file_descriptor_set() {
        let message = message_with_field(b"Msg", ID_FIELD);
        let mut file = vec![0x22, message.len() as u8];
        file.extend_from_slice(&message);
        let mut set = vec![0x0A, file.len() as u8];
        set.extend_from_slice(&file);

        let decoded = decode_file_descriptor_set(&set).unwrap();
        assert_eq!(decoded.file.len(), 1);
        assert_eq!(decoded.file[0].message_type[0].name, "Msg");
    }

    #[test]
    fn test_decode_enum_and_lookup() {
        // enum Color { RED = 0; BLUE = 2; }
        let mut data = vec![0x0A, 0x05];
        data.extend_from_slice(b"Color");
        data.extend_from_slice(&[0x12, 0x07, 0x0A, 0x03, b'R', b'E', b'D', 0x10, 0x00]);
        data.extend_from_slice(&[0x12, 0x08, 0x0A, 0x04, b'B', b'L', b'U', b'E', 0x10, 0x02]);

        let color = EnumDescriptorProto::decode(&data).unwrap();
        assert_eq!(color.value.len(), 2);
        assert_eq!(color.value_number("BLUE"), Some(2));
        assert_eq!(color.value_number("GREEN"), None);

        let file = FileDescriptorProto {
            package: "pkg".to_string(),
            enum_type: vec![color],
            ..Default::default()
        };
        assert!(file.find_enum(".pkg.Color").is_some());
        assert!(file.find_enum(".pkg.Shade").is_none());
        assert!(file.find_enum(".other.Color").is_none());
        assert!(file.find_enum(".pkgx.Color").is_none());
        assert!(file.find_enum("Color").is_none());
    }

    fn status(values: &[(&str, i32)]) -> EnumDescriptorProto {
        EnumDescriptorProto {
            name: "Status".to_string(),
            value: values
                .iter()
                .map(|(name, number)| EnumValueDescriptorProto {
                    name: name.to_string(),
                    number: *number,
                    has_name: true,
                    has_number: true,
                })
                .collect(),
            has_name: true,
        }
    }

    #[test]
    fn test_find_enum_scoped_by_message() {
        let file = FileDescriptorProto {
            package: "a.b".to_string(),
            message_type: vec![
                DescriptorProto {
                    name: "A".to_string(),
                    enum_type: vec![status(&[("OK", 0), ("FAIL", 1)])],
                    ..Default::default()
                },
                DescriptorProto {
                    name: "B".to_string(),
                    enum_type: vec![status(&[("UNKNOWN", 0), ("OK", 5)])],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let b_status = file.find_enum(".a.b.B.Status").unwrap();
        assert_eq!(b_status.value_number("OK"), Some(5));
        let a_status = file.find_enum(".a.b.A.Status").unwrap();
        assert_eq!(a_status.value_number("OK"), Some(0));
        assert!(file.find_enum(".a.b.Status").is_none());
        assert!(file.find_enum(".a.b.C.Status").is_none());
    }

    #[test]
    fn test_find_enum_without_package() {
        let file = FileDescriptorProto {
            enum_type: vec![status(&[("OK", 1)])],
            ..Default::default()
        };
        assert!(file.find_enum(".Status").is_some());
    }

    #[test]
    fn test_decode_truncated_schema() {
        let data = &ID_FIELD[..ID_FIELD.len() - 1];
        assert!(matches!(
            FieldDescriptorProto::decode(data),
            Err(CodecError::Truncated { .. })
        ));
    }

    #[test]
    fn test_name_with_wrong_wire_type() {
        // field 1 (name) sent as varint
        let data = [0x08, 0x01];
        assert!(matches!(
            FieldDescriptorProto::decode(&data),
            Err(CodecError::WireTypeMismatch { .. })
        ));
    }
}
