// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! ROS1 bag file writer.
//!
//! Produces bag files in format version 2.0, byte-compatible with the
//! reference `rosbag` tooling. The file layout is:
//!
//! 1. Version line: `#ROSBAG V2.0\n`
//! 2. Bag header record padded to a fixed 4096-byte envelope, rewritten
//!    in place during [`close`](BagWriter::close)
//! 3. Chunks: a CHUNK record (connection + message records) followed by
//!    one IDXDATA record per connection in the chunk
//! 4. Trailing index: CONNECTION records, then one CHUNK_INFO per chunk
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use rosbag_writer::BagWriter;
//!
//! let mut writer = BagWriter::create("output.bag");
//! writer.open()?;
//!
//! // Predefined schema: definition and md5sum are looked up by type.
//! let conn = writer.add_connection("/counter", "std_msgs/Int8")?;
//!
//! writer.write(conn, 1_500_000_000, &[42])?;
//! writer.close()?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::core::{BagError, Result};
use crate::io::sink::{FileSink, MemorySink, Sink};
use crate::record::encode::{ns_to_bytes, write_u32};
use crate::record::{
    RecordHeader, CHUNK_INFO_VERSION, INDEX_VERSION, OP_BAG_HEADER, OP_CHUNK, OP_CHUNK_INFO,
    OP_INDEX_DATA, OP_MSG_DATA,
};
use crate::schema;
use crate::types::chunk::{ChunkBuilder, ChunkInfo, TIME_UNSET};

pub mod connection;

pub use connection::{ConnectionId, ConnectionOptions};

use connection::Connection;

/// Bag format magic, including the trailing newline.
pub const BAG_MAGIC: &[u8; 13] = b"#ROSBAG V2.0\n";

/// Fixed on-disk envelope reserved for the bag header record.
const HEADER_ENVELOPE: usize = 4096;

/// Default chunk rotation threshold (1 MiB).
const DEFAULT_CHUNK_THRESHOLD: usize = 1024 * 1024;

/// The only supported chunk compression.
const COMPRESSION_NONE: &str = "none";

/// Writer lifecycle. Transitions are one-way; re-opening is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fresh,
    Open,
    Closed,
}

/// Where the bag bytes go.
#[derive(Debug, Clone)]
enum Destination {
    File(PathBuf),
    Memory,
}

/// ROS1 bag file writer.
///
/// # Important
///
/// You must call [`close()`](BagWriter::close) to finalize the bag: the
/// trailing index and the final bag header are only written there.
/// Dropping an open writer leaves an incomplete file and logs a warning.
pub struct BagWriter {
    destination: Destination,
    sink: Option<Box<dyn Sink>>,
    phase: Phase,
    /// Registered connections, indexed by their dense id
    connections: Vec<Connection>,
    /// The active chunk; always present while open
    chunk: ChunkBuilder,
    /// Summaries of flushed chunks, in flush order
    chunks: Vec<ChunkInfo>,
    chunk_threshold: usize,
}

impl std::fmt::Debug for BagWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BagWriter")
            .field("destination", &self.destination)
            .field("phase", &self.phase)
            .field("connections", &self.connections)
            .field("chunks", &self.chunks)
            .field("chunk_threshold", &self.chunk_threshold)
            .finish()
    }
}

impl BagWriter {
    /// Create a writer that will produce a file at `path`.
    ///
    /// The file itself is created by [`open`](BagWriter::open), which fails
    /// if the path already exists.
    pub fn create<P: AsRef<Path>>(path: P) -> Self {
        Self::new(Destination::File(path.as_ref().to_path_buf()))
    }

    /// Create a writer that accumulates the bag in memory.
    ///
    /// Retrieve the bytes with [`into_bytes`](BagWriter::into_bytes) after
    /// closing.
    pub fn in_memory() -> Self {
        Self::new(Destination::Memory)
    }

    fn new(destination: Destination) -> Self {
        Self {
            destination,
            sink: None,
            phase: Phase::Fresh,
            connections: Vec::new(),
            chunk: ChunkBuilder::new(),
            chunks: Vec::new(),
            chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
        }
    }

    /// Override the chunk rotation threshold.
    ///
    /// The threshold is compared after appending, so a single oversized
    /// message still lands in one chunk; messages are never split.
    pub fn with_chunk_threshold(mut self, bytes: usize) -> Self {
        self.chunk_threshold = bytes;
        self
    }

    /// Select the chunk compression format. Only `"none"` is supported.
    pub fn with_compression(self, format: &str) -> Result<Self> {
        if format == COMPRESSION_NONE {
            Ok(self)
        } else {
            Err(BagError::unsupported(format!("compression: {format}")))
        }
    }

    /// Whether the writer is currently open.
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    /// Number of connections registered so far.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of chunks flushed so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of messages written so far.
    pub fn message_count(&self) -> u64 {
        let flushed: u64 = self
            .chunks
            .iter()
            .flat_map(|c| c.message_counts.values())
            .map(|&n| n as u64)
            .sum();
        let active: u64 = self
            .chunk
            .connections()
            .values()
            .map(|entries| entries.len() as u64)
            .sum();
        flushed + active
    }

    /// Open the destination and write the preliminary file header.
    ///
    /// A no-op when already open. Fails with `FileExists` if the file-mode
    /// path is taken, without touching the existing file.
    pub fn open(&mut self) -> Result<()> {
        match self.phase {
            Phase::Open => return Ok(()),
            Phase::Closed => return Err(BagError::already_closed("open")),
            Phase::Fresh => {}
        }

        let mut sink: Box<dyn Sink> = match &self.destination {
            Destination::File(path) => Box::new(FileSink::create(path)?),
            Destination::Memory => Box::new(MemorySink::new()),
        };

        // Preliminary header with placeholder counts; close() patches the
        // real values into the same envelope.
        sink.write(BAG_MAGIC)?;
        sink.write(&Self::bag_header_record(0, 0, 0))?;

        self.sink = Some(sink);
        self.chunk = ChunkBuilder::new();
        self.phase = Phase::Open;
        Ok(())
    }

    /// Register a connection whose schema comes from the predefined table.
    pub fn add_connection(&mut self, topic: &str, msgtype: &str) -> Result<ConnectionId> {
        self.add_connection_with(topic, msgtype, ConnectionOptions::new())
    }

    /// Register a connection with explicit schema or extension fields.
    ///
    /// Missing `msgdef`/`md5sum` are resolved from the predefined table;
    /// `SchemaRequired` if the type has no entry there. A connection whose
    /// six-field tuple (topic, type, definition, md5sum, callerid,
    /// latching) is already registered is rejected as a duplicate.
    pub fn add_connection_with(
        &mut self,
        topic: &str,
        msgtype: &str,
        options: ConnectionOptions,
    ) -> Result<ConnectionId> {
        if self.phase != Phase::Open {
            return Err(BagError::not_open("add connection"));
        }

        let (msgdef, md5sum) = match (options.msgdef, options.md5sum) {
            (Some(msgdef), Some(md5sum)) => (msgdef, md5sum),
            (msgdef, md5sum) => {
                let Some(predefined) = schema::lookup(msgtype) else {
                    return Err(BagError::schema_required(msgtype));
                };
                (
                    msgdef.unwrap_or_else(|| predefined.msgdef.to_string()),
                    md5sum.unwrap_or_else(|| predefined.md5sum.to_string()),
                )
            }
        };

        if self.connections.iter().any(|c| {
            c.matches(
                topic,
                msgtype,
                &msgdef,
                &md5sum,
                options.callerid.as_deref(),
                options.latching,
            )
        }) {
            return Err(BagError::duplicate_connection(topic));
        }

        let id = self.connections.len() as u32;
        let connection = Connection {
            id,
            topic: topic.to_string(),
            msgtype: msgtype.to_string(),
            msgdef,
            md5sum,
            callerid: options.callerid,
            latching: options.latching,
        };

        // The connection record pair goes into the active chunk right away;
        // it is written again into the trailing index at close.
        self.chunk.append(&connection.serialize_records());
        self.connections.push(connection);

        Ok(ConnectionId(id))
    }

    /// Write one message against a registered connection.
    ///
    /// The index entry is captured before the record is appended, so the
    /// recorded offset points at the MSGDATA header inside the chunk body.
    pub fn write(&mut self, connection: ConnectionId, time_ns: u64, payload: &[u8]) -> Result<()> {
        if self.phase != Phase::Open {
            return Err(BagError::not_open("write message"));
        }
        let id = connection.0;
        if id as usize >= self.connections.len() {
            return Err(BagError::unknown_connection(id));
        }

        self.chunk.record_message(id, time_ns);

        let mut header = RecordHeader::new();
        header.set_u32("conn", id).set_time("time", time_ns);
        let mut record = header.serialize(Some(OP_MSG_DATA));
        write_u32(&mut record, payload.len() as u32);
        self.chunk.append(&record);
        self.chunk.append(payload);

        if self.chunk.size() > self.chunk_threshold {
            self.flush_chunk()?;
        }

        Ok(())
    }

    /// Finalize the bag: flush the trailing chunk, write the index region,
    /// patch the final header, and release the sink.
    ///
    /// A no-op when already closed.
    pub fn close(&mut self) -> Result<()> {
        match self.phase {
            Phase::Closed => return Ok(()),
            Phase::Fresh => return Err(BagError::not_open("close")),
            Phase::Open => {}
        }

        // A trailing chunk holding only connection records is still
        // flushed; a chunk with no bytes at all is skipped.
        if !self.chunk.is_empty() {
            self.flush_chunk()?;
        }

        let Some(sink) = self.sink.as_mut() else {
            return Err(BagError::not_open("close"));
        };

        let index_pos = sink.position();

        for connection in &self.connections {
            sink.write(&connection.serialize_records())?;
        }

        for info in &self.chunks {
            let start_ns = if info.start_ns == TIME_UNSET {
                0
            } else {
                info.start_ns
            };
            let mut header = RecordHeader::new();
            header
                .set_u32("ver", CHUNK_INFO_VERSION)
                .set_u64("chunk_pos", info.pos)
                .set_time("start_time", start_ns)
                .set_time("end_time", info.end_ns)
                .set_u32("count", info.message_counts.len() as u32);
            let mut out = header.serialize(Some(OP_CHUNK_INFO));
            write_u32(&mut out, (info.message_counts.len() * 8) as u32);
            for (&conn_id, &count) in &info.message_counts {
                write_u32(&mut out, conn_id);
                write_u32(&mut out, count);
            }
            sink.write(&out)?;
        }

        let final_header = Self::bag_header_record(
            index_pos,
            self.connections.len() as u32,
            self.chunks.len() as u32,
        );
        sink.patch(BAG_MAGIC.len() as u64, &final_header)?;

        sink.close()?;
        self.phase = Phase::Closed;

        tracing::debug!(
            index_pos,
            connections = self.connections.len(),
            chunks = self.chunks.len(),
            "bag finalized"
        );

        Ok(())
    }

    /// Take the produced bytes. In-memory mode only, after `close`.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        if !matches!(self.destination, Destination::Memory) {
            return Err(BagError::wrong_mode("in-memory"));
        }
        if self.phase != Phase::Closed {
            return Err(BagError::NotClosed);
        }
        let Some(sink) = self.sink.take() else {
            return Err(BagError::NotClosed);
        };
        match sink.into_any().downcast::<MemorySink>() {
            Ok(memory) => memory.into_bytes(),
            Err(_) => Err(BagError::wrong_mode("in-memory")),
        }
    }

    /// Flush the active chunk: CHUNK record, body, then one IDXDATA record
    /// per participating connection in ascending id order.
    fn flush_chunk(&mut self) -> Result<()> {
        let chunk = std::mem::take(&mut self.chunk);
        let Some(sink) = self.sink.as_mut() else {
            return Err(BagError::not_open("flush chunk"));
        };

        let pos = sink.position();

        let mut header = RecordHeader::new();
        header
            .set_string("compression", COMPRESSION_NONE)
            .set_u32("size", chunk.size() as u32);
        let mut out = header.serialize(Some(OP_CHUNK));
        // Uncompressed, so the stored body length equals the chunk size.
        write_u32(&mut out, chunk.size() as u32);
        sink.write(&out)?;
        sink.write(chunk.body())?;

        for (&conn_id, entries) in chunk.connections() {
            let mut index = RecordHeader::new();
            index
                .set_u32("ver", INDEX_VERSION)
                .set_u32("conn", conn_id)
                .set_u32("count", entries.len() as u32);
            let mut out = index.serialize(Some(OP_INDEX_DATA));
            write_u32(&mut out, (entries.len() * 12) as u32);
            for entry in entries {
                out.extend(ns_to_bytes(entry.time_ns));
                write_u32(&mut out, entry.offset);
            }
            sink.write(&out)?;
        }

        tracing::debug!(
            pos,
            size = chunk.size(),
            connections = chunk.connections().len(),
            "flushed chunk"
        );

        self.chunks.push(chunk.to_info(pos));
        Ok(())
    }

    /// Serialize a bag header record padded to the 4096-byte envelope.
    ///
    /// The padding length is derived from the serialized header size, and
    /// the preliminary and final headers carry the same fixed-width fields,
    /// so the close-time patch lands on exactly the reserved bytes.
    fn bag_header_record(index_pos: u64, conn_count: u32, chunk_count: u32) -> Vec<u8> {
        let mut header = RecordHeader::new();
        header
            .set_u64("index_pos", index_pos)
            .set_u32("conn_count", conn_count)
            .set_u32("chunk_count", chunk_count);
        let mut buffer = header.serialize(Some(OP_BAG_HEADER));

        let pad_len = HEADER_ENVELOPE - 4 - buffer.len();
        write_u32(&mut buffer, pad_len as u32);
        buffer.resize(HEADER_ENVELOPE, b' ');
        buffer
    }
}

impl Drop for BagWriter {
    fn drop(&mut self) {
        if self.phase == Phase::Open {
            tracing::warn!("BagWriter dropped without close(); bag is incomplete");
        }
    }
}
