// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # protodec CLI
//!
//! Generate Rust decoders from compiled protobuf schemas and look inside
//! protobuf buffers.
//!
//! ## Usage
//!
//! ```sh
//! # Compile a schema and generate decoders
//! protoc --descriptor_set_out=schema.pb schema.proto
//! protodec generate schema.pb -o schema.rs
//!
//! # Show how each field will be decoded
//! protodec inspect schema.pb
//!
//! # Dump any protobuf buffer without a schema
//! protodec dump message.bin --json
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{DumpCmd, GenerateCmd, InspectCmd};
use common::Result;

/// protodec - protobuf decoder generator
///
/// Reads schemas compiled by protoc and emits dependency-light Rust decoders.
#[derive(Parser, Clone)]
#[command(name = "protodec")]
#[command(about = "Protobuf decoder generator and wire inspector", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Generate Rust decoders from a FileDescriptorSet
    Generate(GenerateCmd),

    /// Show the decode plan of every message in a FileDescriptorSet
    Inspect(InspectCmd),

    /// Dump the fields of a protobuf buffer without a schema
    Dump(DumpCmd),
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(cmd) => cmd.run(),
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Dump(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
