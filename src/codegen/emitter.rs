// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Rust source rendering for classified messages.
//!
//! Each message becomes a plain struct with one `pub` field per schema field,
//! a `has_<name>` flag per singular field, a `Default` impl and an
//! `impl DecodeMessage` that routes field numbers to the dispatcher helpers.
//!
//! Generated code never imports runtime or std names bare. The runtime is
//! aliased as [`RUNTIME_ALIAS`] and std types are written as absolute paths,
//! so messages named `Result`, `String` or `Option` cannot shadow them.

use crate::codegen::classify::FieldEmission;
use crate::codegen::options::GeneratorOptions;
use crate::codegen::MessagePlan;
use crate::encoding::protobuf::{DecodeDomain, WireType};
use crate::schema::FieldType;

/// Local name the generated file gives the runtime module.
pub const RUNTIME_ALIAS: &str = "__protodec";

const STRING: &str = "::std::string::String";
const VEC: &str = "::std::vec::Vec";
const DEFAULT: &str = "::core::default::Default";

/// Keywords that cannot be used as raw identifiers either.
const PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate"];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Field name as a valid Rust identifier.
pub fn rust_ident(name: &str) -> String {
    if PATH_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if KEYWORDS.contains(&name) {
        format!("r#{name}")
    } else {
        name.to_string()
    }
}

/// Name of the presence flag of a singular field.
pub fn presence_ident(name: &str) -> String {
    format!("has_{name}")
}

/// Renders generated decoders.
pub struct Emitter<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }

    /// Render a complete source file for `messages`.
    pub fn render(&self, source_name: &str, messages: &[MessagePlan]) -> String {
        let mut out = String::new();

        if self.options.header {
            out.push_str(&format!(
                "// This file was auto-generated from {source_name} by protodec. Do not edit.\n\n"
            ));
        }

        if !messages.is_empty() {
            out.push_str(&format!(
                "use {} as {RUNTIME_ALIAS};\n",
                self.options.runtime_path
            ));
        }

        for message in messages {
            out.push('\n');
            out.push_str(&self.render_message(message));
        }

        out
    }

    fn render_message(&self, message: &MessagePlan) -> String {
        let has_defaults = message.fields.iter().any(|f| f.default_text.is_some());

        // A configured `Default` derive would clash with the explicit impl.
        let mut derives = self.options.derives.clone();
        if has_defaults {
            derives.retain(|d| !is_default_derive(d));
        } else if !derives.iter().any(|d| is_default_derive(d)) {
            derives.push("Default".to_string());
        }

        let mut out = String::new();
        if !derives.is_empty() {
            out.push_str(&format!("#[derive({})]\n", derives.join(", ")));
        }
        out.push_str(&self.render_struct(message));
        if has_defaults {
            out.push('\n');
            out.push_str(&self.render_default_impl(message));
        }
        out.push('\n');
        out.push_str(&self.render_decode_impl(message));
        out
    }

    fn render_struct(&self, message: &MessagePlan) -> String {
        let mut out = format!("pub struct {} {{\n", message.name);

        for field in &message.fields {
            out.push_str(&format!(
                "    pub {}: {},\n",
                rust_ident(&field.name),
                field_type(field)
            ));
        }

        let mut flags = message.fields.iter().filter(|f| f.has_presence()).peekable();
        if flags.peek().is_some() {
            out.push('\n');
            for field in flags {
                out.push_str(&format!("    pub {}: bool,\n", presence_ident(&field.name)));
            }
        }

        out.push_str("}\n");
        out
    }

    fn render_default_impl(&self, message: &MessagePlan) -> String {
        let mut out = format!(
            "impl {DEFAULT} for {} {{\n    fn default() -> Self {{\n        Self {{\n",
            message.name
        );

        for field in &message.fields {
            let value = match &field.default_text {
                Some(text) => default_expr(field, text),
                None => format!("{DEFAULT}::default()"),
            };
            out.push_str(&format!("            {}: {value},\n", rust_ident(&field.name)));
        }
        for field in message.fields.iter().filter(|f| f.has_presence()) {
            out.push_str(&format!("            {}: false,\n", presence_ident(&field.name)));
        }

        out.push_str("        }\n    }\n}\n");
        out
    }

    fn render_decode_impl(&self, message: &MessagePlan) -> String {
        let mut out = format!(
            "impl {RUNTIME_ALIAS}::DecodeMessage for {} {{\n    fn decode_fields(&mut self, fields: &mut {RUNTIME_ALIAS}::FieldDispatcher<'_>) -> {RUNTIME_ALIAS}::Result<()> {{\n",
            message.name
        );

        out.push_str("        while let Some(tag) = fields.next_field()? {\n");
        if message.fields.is_empty() {
            out.push_str("            fields.skip_field(tag.wire_type)?;\n");
        } else {
            out.push_str("            match tag.number {\n");
            for field in &message.fields {
                out.push_str(&format!(
                    "                {} => {}?,\n",
                    field.number,
                    decode_call(field)
                ));
            }
            out.push_str("                _ => fields.skip_field(tag.wire_type)?,\n");
            out.push_str("            }\n");
        }
        out.push_str("        }\n");

        for field in message.fields.iter().filter(|f| f.is_required && f.has_presence()) {
            out.push_str(&format!(
                "        fields.check_required(self.{}, \"{}\", \"{}\")?;\n",
                presence_ident(&field.name),
                message.name,
                field.name
            ));
        }

        out.push_str("        Ok(())\n    }\n}\n");
        out
    }
}

/// `Default`, however the derive path is spelled.
fn is_default_derive(path: &str) -> bool {
    path.rsplit("::").next() == Some("Default")
}

/// Whether the repeated helper for `field` takes the element wire type.
fn takes_element_wire_type(field: &FieldEmission) -> bool {
    field.is_repeated
        && matches!(
            field.decode_domain,
            DecodeDomain::Integer | DecodeDomain::Zigzag | DecodeDomain::FloatingPoint
        )
}

/// Element type with std types spelled as absolute paths.
fn element_type(field: &FieldEmission) -> String {
    match field.field_type {
        FieldType::String => STRING.to_string(),
        FieldType::Bytes => format!("{VEC}<u8>"),
        _ => field.target_type_name.clone(),
    }
}

fn field_type(field: &FieldEmission) -> String {
    let element = element_type(field);
    if field.is_repeated {
        format!("{VEC}<{element}>")
    } else if field.is_boxed {
        format!("::core::option::Option<::std::boxed::Box<{element}>>")
    } else {
        element
    }
}

fn decode_call(field: &FieldEmission) -> String {
    let infix = field.decode_domain.helper_infix();
    let ident = rust_ident(&field.name);

    if !field.is_repeated {
        format!(
            "fields.read_{infix}_field(tag.wire_type, &mut self.{ident}, &mut self.{})",
            presence_ident(&field.name)
        )
    } else if takes_element_wire_type(field) {
        format!(
            "fields.read_repeated_{infix}_field(tag.wire_type, {RUNTIME_ALIAS}::WireType::{}, &mut self.{ident})",
            wire_type_variant(field.wire_type)
        )
    } else {
        format!("fields.read_repeated_{infix}_field(tag.wire_type, &mut self.{ident})")
    }
}

fn wire_type_variant(wire_type: WireType) -> &'static str {
    match wire_type {
        WireType::Varint => "Varint",
        WireType::Fixed64 => "Fixed64",
        WireType::LengthDelimited => "LengthDelimited",
        WireType::StartGroup => "StartGroup",
        WireType::EndGroup => "EndGroup",
        WireType::Fixed32 => "Fixed32",
    }
}

/// Expression initializing a field from its schema default.
fn default_expr(field: &FieldEmission, text: &str) -> String {
    match field.field_type {
        FieldType::String => format!("{STRING}::from({text})"),
        FieldType::Bytes => format!("{text}.to_vec()"),
        FieldType::Double | FieldType::Float => {
            let ty = field.target_type_name.as_str();
            match text {
                "inf" => format!("{ty}::INFINITY"),
                "-inf" => format!("{ty}::NEG_INFINITY"),
                "nan" => format!("{ty}::NAN"),
                _ => format!("{text}_{ty}"),
            }
        }
        _ => text.to_string(),
    }
}
