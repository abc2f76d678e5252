// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout protodec.
//!
//! - [`CodecError`] - Error taxonomy shared by the engine and the generator
//! - [`Result`] - Crate-wide result alias

pub mod error;

pub use error::{CodecError, Result};
