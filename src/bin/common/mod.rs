// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use std::path::Path;

use anyhow::Context as _;
use serde::Serialize;

use protodec::schema::{decode_file_descriptor_set, FileDescriptorSet};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Read a whole input file.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Read and decode a compiled schema.
pub fn load_schema(path: &Path) -> Result<FileDescriptorSet> {
    let data = read_input(path)?;
    decode_file_descriptor_set(&data)
        .with_context(|| format!("Failed to decode FileDescriptorSet {}", path.display()))
}

/// Print `value` as pretty JSON, or run the human-readable printer.
pub fn output_json_or<T>(
    json: bool,
    value: &T,
    human_fn: impl FnOnce() -> std::io::Result<()>,
) -> Result<()>
where
    T: Serialize,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human_fn()?;
    }
    Ok(())
}
