// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Inspect command - show how each schema field will be decoded.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::common::{load_schema, output_json_or, Result};
use protodec::codegen::{FieldEmission, MessagePlan};
use protodec::Generator;

/// Show the decode plan of a compiled schema.
#[derive(Args, Clone, Debug)]
pub struct InspectCmd {
    /// Compiled schema (protoc --descriptor_set_out)
    #[arg(value_name = "SCHEMA")]
    schema: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,
}

impl InspectCmd {
    pub fn run(self) -> Result<()> {
        let set = load_schema(&self.schema)?;
        let messages = Generator::default().plan(&set)?;

        let (file, package) = set
            .file
            .first()
            .map(|f| (f.name.clone(), f.package.clone()))
            .unwrap_or_default();

        let report = SchemaReport {
            file,
            package,
            files_in_set: set.file.len(),
            messages,
        };

        output_json_or(self.json, &report, || {
            println!("=== {} ===", self.schema.display());
            println!("File: {}", report.file);
            if !report.package.is_empty() {
                println!("Package: {}", report.package);
            }
            if report.files_in_set > 1 {
                println!(
                    "Note: {} more file(s) in the set are not generated",
                    report.files_in_set - 1
                );
            }

            for message in &report.messages {
                println!();
                println!("{}", message.name);
                for field in &message.fields {
                    println!("  {}", describe_field(field));
                }
            }
            Ok(())
        })
    }
}

fn describe_field(field: &FieldEmission) -> String {
    let strategy = if field.is_repeated {
        "repeated"
    } else if field.is_required {
        "required"
    } else {
        "optional"
    };

    let mut line = format!(
        "{:>4}  {:<20} {:<9} {:<10} {:<15} -> {}",
        field.number,
        field.name,
        strategy,
        field.field_type.as_str(),
        field.decode_domain.as_str(),
        field.target_type_name
    );
    if field.is_boxed {
        line.push_str(" (boxed)");
    }
    if let Some(default) = &field.default_text {
        line.push_str(&format!(" = {default}"));
    }
    line
}

// Output types

#[derive(Serialize)]
struct SchemaReport {
    file: String,
    package: String,
    files_in_set: usize,
    messages: Vec<MessagePlan>,
}
