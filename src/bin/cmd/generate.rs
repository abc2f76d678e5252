// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generate command - emit Rust decoders for a compiled schema.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;

use crate::common::{load_schema, Result};
use protodec::{Generator, GeneratorOptions};

/// Generate Rust decoders.
#[derive(Args, Clone, Debug)]
pub struct GenerateCmd {
    /// Compiled schema (protoc --descriptor_set_out)
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,

    /// Write the generated source here instead of stdout
    #[arg(short, long, value_name = "OUT")]
    output: Option<PathBuf>,

    /// Generator options (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,
}

impl GenerateCmd {
    pub fn run(self) -> Result<()> {
        let options = match &self.config {
            Some(path) => GeneratorOptions::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GeneratorOptions::default(),
        };

        let set = load_schema(&self.schema)?;
        let source_name = self.schema.display().to_string();

        // Generation completes in memory before anything is written.
        let source = Generator::new(options).generate(&set, &source_name)?;

        match &self.output {
            Some(path) => std::fs::write(path, source)
                .with_context(|| format!("Failed to write {}", path.display()))?,
            None => print!("{source}"),
        }

        Ok(())
    }
}
