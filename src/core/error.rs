// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for protodec.
//!
//! Every fallible operation in the crate reports one of these kinds:
//! - Wire-level failures (truncation, varint overflow, wire type problems)
//! - Message-level failures (missing required fields, invalid text)
//! - Schema-level failures (constructs the generator cannot express)
//! - Generator shell failures (I/O, configuration)

use std::fmt;

/// Errors that can occur while decoding wire data or generating decoders.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A read would move the cursor past the end of its range
    Truncated {
        /// Requested bytes
        requested: usize,
        /// Available bytes
        available: usize,
        /// Cursor position when error occurred
        cursor_pos: usize,
    },

    /// A varint used more than 10 base-128 groups
    VarintOverflow {
        /// Position of the first byte of the varint
        cursor_pos: usize,
    },

    /// The wire type on the buffer cannot carry the requested value kind
    WireTypeMismatch {
        /// Raw wire type from the field tag
        wire_type: u8,
        /// Value kind that was requested (integer, zigzag, ...)
        kind: &'static str,
        /// Cursor position when error occurred
        cursor_pos: usize,
    },

    /// Group wire types, or a tag suffix that is not a wire type at all
    UnsupportedWireType {
        /// Raw wire type from the field tag
        wire_type: u8,
        /// Cursor position when error occurred
        cursor_pos: usize,
    },

    /// A required field had no occurrence in the decoded buffer
    MissingRequiredField {
        /// Owning message name
        message: String,
        /// Field name
        field: String,
    },

    /// Schema construct the generator does not support (e.g. group fields)
    UnsupportedSchemaConstruct {
        /// Owning message name
        message: String,
        /// Field name
        field: String,
        /// What is not supported
        construct: String,
    },

    /// A text slot received bytes that are not valid UTF-8
    InvalidUtf8 {
        /// Cursor position after the offending bytes
        cursor_pos: usize,
    },

    /// Generator configuration could not be parsed
    Config {
        /// Error message
        message: String,
    },

    /// I/O failure in the generator shell
    Io(String),
}

impl CodecError {
    /// Create a truncation error.
    pub fn truncated(requested: usize, available: usize, cursor_pos: usize) -> Self {
        CodecError::Truncated {
            requested,
            available,
            cursor_pos,
        }
    }

    /// Create a varint overflow error.
    pub fn varint_overflow(cursor_pos: usize) -> Self {
        CodecError::VarintOverflow { cursor_pos }
    }

    /// Create a wire type mismatch error.
    pub fn wire_type_mismatch(wire_type: u8, kind: &'static str, cursor_pos: usize) -> Self {
        CodecError::WireTypeMismatch {
            wire_type,
            kind,
            cursor_pos,
        }
    }

    /// Create an unsupported wire type error.
    pub fn unsupported_wire_type(wire_type: u8, cursor_pos: usize) -> Self {
        CodecError::UnsupportedWireType {
            wire_type,
            cursor_pos,
        }
    }

    /// Create a missing required field error.
    pub fn missing_required_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        CodecError::MissingRequiredField {
            message: message.into(),
            field: field.into(),
        }
    }

    /// Create an unsupported schema construct error.
    pub fn unsupported_schema_construct(
        message: impl Into<String>,
        field: impl Into<String>,
        construct: impl Into<String>,
    ) -> Self {
        CodecError::UnsupportedSchemaConstruct {
            message: message.into(),
            field: field.into(),
            construct: construct.into(),
        }
    }

    /// Create an invalid UTF-8 error.
    pub fn invalid_utf8(cursor_pos: usize) -> Self {
        CodecError::InvalidUtf8 { cursor_pos }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CodecError::Config {
            message: message.into(),
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::Truncated {
                requested,
                available,
                cursor_pos,
            } => vec![
                ("requested", requested.to_string()),
                ("available", available.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::VarintOverflow { cursor_pos } => vec![("cursor", cursor_pos.to_string())],
            CodecError::WireTypeMismatch {
                wire_type,
                kind,
                cursor_pos,
            } => vec![
                ("wire_type", wire_type.to_string()),
                ("kind", kind.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::UnsupportedWireType {
                wire_type,
                cursor_pos,
            } => vec![
                ("wire_type", wire_type.to_string()),
                ("cursor", cursor_pos.to_string()),
            ],
            CodecError::MissingRequiredField { message, field } => {
                vec![("message", message.clone()), ("field", field.clone())]
            }
            CodecError::UnsupportedSchemaConstruct {
                message,
                field,
                construct,
            } => vec![
                ("message", message.clone()),
                ("field", field.clone()),
                ("construct", construct.clone()),
            ],
            CodecError::InvalidUtf8 { cursor_pos } => vec![("cursor", cursor_pos.to_string())],
            CodecError::Config { message } => vec![("message", message.clone())],
            CodecError::Io(msg) => vec![("message", msg.clone())],
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Truncated {
                requested,
                available,
                cursor_pos,
            } => write!(
                f,
                "Unexpected end of buffer: requested {requested} bytes at position {cursor_pos}, but only {available} bytes available"
            ),
            CodecError::VarintOverflow { cursor_pos } => {
                write!(f, "More than 10 bytes in varint at position {cursor_pos}")
            }
            CodecError::WireTypeMismatch {
                wire_type,
                kind,
                cursor_pos,
            } => write!(
                f,
                "Can't parse {kind} value with wire type {wire_type} at position {cursor_pos}"
            ),
            CodecError::UnsupportedWireType {
                wire_type,
                cursor_pos,
            } => write!(
                f,
                "Unsupported wire type {wire_type} at position {cursor_pos}"
            ),
            CodecError::MissingRequiredField { message, field } => {
                write!(f, "Decoded protobuf has no required field {message}.{field}")
            }
            CodecError::UnsupportedSchemaConstruct {
                message,
                field,
                construct,
            } => write!(
                f,
                "Unsupported schema construct in {message}.{field}: {construct}"
            ),
            CodecError::InvalidUtf8 { cursor_pos } => {
                write!(f, "Invalid UTF-8 in string field ending at position {cursor_pos}")
            }
            CodecError::Config { message } => write!(f, "Invalid configuration: {message}"),
            CodecError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for CodecError {}

impl From<std::io::Error> for CodecError {
    fn from(err: std::io::Error) -> Self {
        CodecError::Io(err.to_string())
    }
}

/// Result type for protodec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
