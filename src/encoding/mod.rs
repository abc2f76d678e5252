// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Message decoding implementations.
//!
//! - [`protobuf`] - Protobuf wire format decoding, also the runtime that
//!   generated decoders call into

pub mod protobuf;

pub use protobuf::{
    DecodeDomain, DecodeMessage, FieldDispatcher, FieldTag, ProtobufDecoder, WireCursor, WireType,
};
