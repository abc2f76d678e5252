// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Dump command - schema-less view of a protobuf buffer.

use std::path::PathBuf;

use clap::Args;

use crate::common::{output_json_or, read_input, Result};
use protodec::encoding::protobuf::{RawField, RawValue};
use protodec::ProtobufDecoder;

/// Dump the fields of a protobuf buffer.
#[derive(Args, Clone, Debug)]
pub struct DumpCmd {
    /// Protobuf-encoded input
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Stop guessing nested messages below this depth
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

impl DumpCmd {
    pub fn run(self) -> Result<()> {
        let data = read_input(&self.input)?;

        let mut decoder = ProtobufDecoder::new();
        if let Some(depth) = self.max_depth {
            decoder = decoder.with_max_depth(depth);
        }
        let fields = decoder.decode(&data)?;

        output_json_or(self.json, &fields, || {
            for line in render_fields(&fields, 0) {
                println!("{line}");
            }
            Ok(())
        })
    }
}

fn render_fields(fields: &[RawField], indent: usize) -> Vec<String> {
    let pad = "  ".repeat(indent);
    let mut lines = Vec::new();

    for field in fields {
        let head = format!("{pad}{} {}", field.number, field.wire_type);
        match &field.value {
            RawValue::Varint(v) => lines.push(format!("{head} {v}")),
            RawValue::Fixed64(v) => lines.push(format!("{head} {v} ({})", f64::from_bits(*v))),
            RawValue::Fixed32(v) => lines.push(format!("{head} {v} ({})", f32::from_bits(*v))),
            RawValue::String(s) => lines.push(format!("{head} {s:?}")),
            RawValue::Bytes(b) => lines.push(format!("{head} bytes {}", hex::encode(b))),
            RawValue::Message(inner) => {
                lines.push(format!("{head} {{"));
                lines.extend(render_fields(inner, indent + 1));
                lines.push(format!("{pad}}}"));
            }
        }
    }

    lines
}
