// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! I/O layer: destination sinks for bag output.

pub mod sink;

pub use sink::{FileSink, MemorySink, Sink};
