// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Data structures carried between writer operations.

pub mod chunk;

pub use chunk::{ChunkBuilder, ChunkInfo, IndexEntry};
