// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # rosbag-writer
//!
//! Writer for ROS1 bag files (format version 2.0).
//!
//! The writer accepts a stream of (connection, timestamp, payload) triples
//! and produces a self-indexed bag any ROS1 reader can open. Messages are
//! grouped into chunks that rotate once they grow past a size threshold;
//! the trailing index region and the final bag header are written during
//! close, when the chunk and connection counts are known.
//!
//! ## Architecture
//!
//! - `record/` - key-value record headers and wire-level primitives
//! - `types/` - chunk accumulation and flushed-chunk summaries
//! - `io/` - destination sinks (file on disk, in-memory buffer)
//! - `schema/` - predefined message definitions for well-known types
//! - `writer/` - the [`BagWriter`] state machine and connection registry
//! - `msg/` - payload builders for common sensor message types
//!
//! ## Example: writing to a file
//!
//! ```rust,no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rosbag_writer::BagWriter;
//!
//! let mut writer = BagWriter::create("output.bag");
//! writer.open()?;
//! let conn = writer.add_connection("/counter", "std_msgs/Int8")?;
//! writer.write(conn, 1_500_000_000, &[42])?;
//! writer.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: writing to memory
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rosbag_writer::BagWriter;
//!
//! let mut writer = BagWriter::in_memory();
//! writer.open()?;
//! let conn = writer.add_connection("/counter", "std_msgs/Int8")?;
//! writer.write(conn, 123, &[0x42])?;
//! writer.close()?;
//! let bytes = writer.into_bytes()?;
//! assert!(bytes.starts_with(b"#ROSBAG V2.0\n"));
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use crate::core::{BagError, Result};

// Record headers and wire primitives
pub mod record;

// Chunk accumulation
pub mod types;

// Destination sinks
pub mod io;

pub use io::{FileSink, MemorySink, Sink};

// Predefined message schemas
pub mod schema;

// The writer state machine
pub mod writer;

pub use writer::{BagWriter, ConnectionId, ConnectionOptions, BAG_MAGIC};

// Message payload builders
pub mod msg;

pub use msg::{ImageMessage, ImuMessage, StampedHeader};
