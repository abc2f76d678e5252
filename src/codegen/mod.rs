// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Decoder generation from compiled schemas.
//!
//! Generation runs in two passes over the first file of a
//! [`FileDescriptorSet`]:
//! 1. [`Generator::plan`] classifies every field of every top-level message,
//!    checks the generated member names and boxes fields on reference cycles.
//!    Any unsupported construct aborts the run here.
//! 2. [`Emitter`] renders the plan as Rust source.
//!
//! Nothing is rendered unless planning succeeded for the whole file.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use protodec::codegen::{Generator, GeneratorOptions};
//! use protodec::schema::load_file_descriptor_set;
//!
//! let set = load_file_descriptor_set("schema.pb")?;
//! let source = Generator::new(GeneratorOptions::default()).generate(&set, "schema.pb")?;
//! println!("{source}");
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod emitter;
pub mod options;

pub use classify::{classify_field, FieldEmission};
pub use emitter::Emitter;
pub use options::GeneratorOptions;

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::codegen::emitter::{presence_ident, rust_ident};
use crate::encoding::protobuf::DecodeDomain;
use crate::schema::{FieldType, FileDescriptorProto, FileDescriptorSet};
use crate::{CodecError, Result};

/// Classified fields of one top-level message, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessagePlan {
    pub name: String,
    pub fields: Vec<FieldEmission>,
}

/// Generates Rust decoders for the messages of a schema.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub fn new(options: GeneratorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Classify every field of every top-level message of the first file.
    pub fn plan(&self, set: &FileDescriptorSet) -> Result<Vec<MessagePlan>> {
        let Some(file) = set.file.first() else {
            warn!(context = "plan", "FileDescriptorSet has no files, nothing to generate");
            return Ok(Vec::new());
        };

        if set.file.len() > 1 {
            warn!(
                context = "plan",
                file = %file.name,
                ignored = set.file.len() - 1,
                "FileDescriptorSet has more than one file, only the first is generated"
            );
        }

        let mut plans = file
            .message_type
            .iter()
            .map(|message| {
                if message.skipped_nested_types > 0 {
                    warn!(
                        context = "plan",
                        message = %message.name,
                        count = message.skipped_nested_types,
                        "Skipping nested message types"
                    );
                }

                let fields = message
                    .field
                    .iter()
                    .map(|field| {
                        let mut emission = classify_field(&message.name, field)?;
                        if emission.field_type == FieldType::Enum {
                            emission.default_text =
                                resolve_enum_default(file, &emission, &field.type_name);
                        }
                        Ok(emission)
                    })
                    .collect::<Result<Vec<_>>>()?;

                check_member_names(&message.name, &fields)?;

                debug!(
                    context = "plan",
                    message = %message.name,
                    fields = fields.len(),
                    "Classified message"
                );

                Ok(MessagePlan {
                    name: message.name.clone(),
                    fields,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        box_recursive_fields(&mut plans);
        Ok(plans)
    }

    /// Generate the Rust source for `set`.
    ///
    /// `source_name` is only used in the header comment.
    pub fn generate(&self, set: &FileDescriptorSet, source_name: &str) -> Result<String> {
        let plan = self.plan(set)?;
        Ok(Emitter::new(&self.options).render(source_name, &plan))
    }
}

/// Reject messages whose fields and presence flags would share a struct member.
fn check_member_names(message: &str, fields: &[FieldEmission]) -> Result<()> {
    let members = fields
        .iter()
        .map(|f| (f, rust_ident(&f.name)))
        .chain(
            fields
                .iter()
                .filter(|f| f.has_presence())
                .map(|f| (f, presence_ident(&f.name))),
        );

    let mut seen = HashSet::new();
    for (field, member) in members {
        if !seen.insert(member.clone()) {
            return Err(CodecError::unsupported_schema_construct(
                message,
                &field.name,
                format!("struct member `{member}` is generated twice"),
            ));
        }
    }
    Ok(())
}

/// Singular message fields whose target can reach the owning message again
/// through singular message fields would make an infinitely sized struct.
/// Those fields are stored boxed.
fn box_recursive_fields(plans: &mut [MessagePlan]) {
    let edges: HashMap<String, Vec<String>> = plans
        .iter()
        .map(|plan| {
            let targets = plan
                .fields
                .iter()
                .filter(|f| is_inline_message(f))
                .map(|f| f.target_type_name.clone())
                .collect();
            (plan.name.clone(), targets)
        })
        .collect();

    for plan in plans.iter_mut() {
        for field in plan.fields.iter_mut().filter(|f| is_inline_message(f)) {
            if reaches(&edges, &field.target_type_name, &plan.name) {
                debug!(
                    context = "plan",
                    message = %plan.name,
                    field = %field.name,
                    "Boxing recursive message field"
                );
                field.is_boxed = true;
            }
        }
    }
}

fn is_inline_message(field: &FieldEmission) -> bool {
    field.decode_domain == DecodeDomain::Message && !field.is_repeated
}

fn reaches(edges: &HashMap<String, Vec<String>>, from: &str, to: &str) -> bool {
    let mut stack = vec![from];
    let mut seen = HashSet::new();

    while let Some(name) = stack.pop() {
        if name == to {
            return true;
        }
        if !seen.insert(name) {
            continue;
        }
        if let Some(next) = edges.get(name) {
            stack.extend(next.iter().map(String::as_str));
        }
    }
    false
}

/// Replace an enum default's value name with its number.
///
/// The enum is looked up by the field's fully qualified type name.
/// Unresolvable defaults are dropped, leaving the field at zero.
fn resolve_enum_default(
    file: &FileDescriptorProto,
    emission: &FieldEmission,
    type_name: &str,
) -> Option<String> {
    let value_name = emission.default_text.as_deref()?;

    let number = file
        .find_enum(type_name)
        .and_then(|e| e.value_number(value_name));

    match number {
        Some(number) => Some(number.to_string()),
        None => {
            warn!(
                context = "resolve_enum_default",
                field = %emission.name,
                default = %value_name,
                enum_type = %type_name,
                "Cannot resolve enum default, leaving field at zero"
            );
            None
        }
    }
}
