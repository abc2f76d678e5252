// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Compiled protobuf schemas.
//!
//! Schemas arrive as a serialized `FileDescriptorSet` (as produced by
//! `protoc --descriptor_set_out`). They are decoded with the crate's own
//! wire engine into the entities of [`descriptor`].

pub mod descriptor;
pub mod field_type;

pub use descriptor::{
    decode_file_descriptor_set, DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto,
    FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet,
};
pub use field_type::{FieldType, Label};

use std::path::Path;

use crate::Result;

/// Read and decode a `FileDescriptorSet` file.
pub fn load_file_descriptor_set<P: AsRef<Path>>(path: P) -> Result<FileDescriptorSet> {
    let data = std::fs::read(path.as_ref())?;
    decode_file_descriptor_set(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = load_file_descriptor_set("/nonexistent/schema.pb");
        assert!(matches!(result, Err(CodecError::Io(_))));
    }

    #[test]
    fn test_empty_set_decodes() {
        let set = decode_file_descriptor_set(&[]).unwrap();
        assert!(set.file.is_empty());
    }
}
