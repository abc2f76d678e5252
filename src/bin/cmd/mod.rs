// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod dump;
mod generate;
mod inspect;

pub use dump::DumpCmd;
pub use generate::GenerateCmd;
pub use inspect::InspectCmd;
