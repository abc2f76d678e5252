// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Generator configuration.
//!
//! Options can be given as TOML; every key is optional:
//!
//! ```toml
//! runtime_path = "crate::wire"
//! derives = ["Debug", "Clone"]
//! header = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CodecError, Result};

/// Settings that shape the emitted source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorOptions {
    /// Module path of the runtime, aliased as `__protodec` in generated code.
    pub runtime_path: String,
    /// Derives placed on every generated struct.
    pub derives: Vec<String>,
    /// Emit the "auto-generated" header comment.
    pub header: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime_path: "protodec".to_string(),
            derives: vec![
                "Debug".to_string(),
                "Clone".to_string(),
                "PartialEq".to_string(),
            ],
            header: true,
        }
    }
}

impl GeneratorOptions {
    /// Parse options from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let options: Self = toml::from_str(text).map_err(|e| CodecError::config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.runtime_path.trim().is_empty() {
            return Err(CodecError::config("runtime_path must not be empty"));
        }
        if let Some(bad) = self.derives.iter().find(|d| !is_path(d)) {
            return Err(CodecError::config(format!("invalid derive name '{bad}'")));
        }
        Ok(())
    }
}

fn is_path(name: &str) -> bool {
    !name.is_empty()
        && name.split("::").all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}
