// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # protodec
//!
//! Self-contained protobuf wire decoding and decoder generation.
//!
//! The crate has two halves built on one engine:
//! - **Runtime** in [`encoding::protobuf`]: a bounds-checked cursor, typed
//!   value decoding and a field dispatcher. Message types implement
//!   [`DecodeMessage`] against it.
//! - **Generator** in [`codegen`]: reads a compiled schema (a wire-encoded
//!   `FileDescriptorSet`, decoded by the same runtime in [`schema`]) and
//!   emits Rust structs with `DecodeMessage` impls.
//!
//! ## Architecture
//!
//! - `core/` - Error type shared by every layer
//! - `encoding/` - Wire format runtime and the schema-less dump decoder
//! - `schema/` - Compiled schema entities, decoded with the runtime
//! - `codegen/` - Field classification and Rust source emission
//!
//! ## Example: Decoding with a generated type
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use protodec::{DecodeMessage, FieldDispatcher, Result};
//!
//! #[derive(Debug, Default)]
//! pub struct Ping {
//!     pub seq: u64,
//!     pub has_seq: bool,
//! }
//!
//! impl DecodeMessage for Ping {
//!     fn decode_fields(&mut self, fields: &mut FieldDispatcher<'_>) -> Result<()> {
//!         while let Some(tag) = fields.next_field()? {
//!             match tag.number {
//!                 1 => fields.read_integer_field(tag.wire_type, &mut self.seq, &mut self.has_seq)?,
//!                 _ => fields.skip_field(tag.wire_type)?,
//!             }
//!         }
//!         fields.check_required(self.has_seq, "Ping", "seq")?;
//!         Ok(())
//!     }
//! }
//!
//! let ping = Ping::decode(&[0x08, 0x96, 0x01])?;
//! assert_eq!(ping.seq, 150);
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Generating decoders
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use protodec::codegen::Generator;
//! use protodec::schema::load_file_descriptor_set;
//!
//! let set = load_file_descriptor_set("schema.pb")?;
//! let source = Generator::default().generate(&set, "schema.pb")?;
//! std::fs::write("schema.rs", source)?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

pub use core::{CodecError, Result};

// Wire format runtime
pub mod encoding;

pub use encoding::protobuf::{
    zigzag_decode, zigzag_encode, DecodeDomain, DecodeMessage, FieldDispatcher, FieldTag,
    ProtobufDecoder, WireCursor, WireType,
};

// Compiled schemas
pub mod schema;

// Decoder generation
pub mod codegen;

pub use codegen::{Generator, GeneratorOptions};
