// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Protobuf wire decoding engine.
//!
//! The engine is layered:
//! - [`cursor`] - bounds-checked primitive reads (varint, fixed, slices)
//! - [`value`] - typed values from a wire type and a [`DecodeDomain`]
//! - [`dispatcher`] - field iteration, skipping and per-field helpers
//! - [`decoder`] - schema-less inspection of arbitrary buffers

pub mod cursor;
pub mod decoder;
pub mod dispatcher;
pub mod value;
pub mod wire;

pub use cursor::WireCursor;
pub use decoder::{ProtobufDecoder, RawField, RawValue};
pub use dispatcher::{DecodeMessage, FieldDispatcher};
pub use value::{DecodeDomain, FromBytes, FromFloat, FromInteger, FromZigzag, WireValue};
pub use wire::{zigzag_decode, zigzag_encode, FieldTag, WireType};
