// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Destination sinks.
//!
//! A [`Sink`] is an append-only byte writer with an absolute position
//! counter and one extra capability the bag format needs: patching an
//! already-written region, used to rewrite the preliminary bag header once
//! the final counts are known. Two implementations exist: a file on disk
//! and an in-memory buffer.

use std::any::Any;
use std::fs::OpenOptions;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use crate::core::{BagError, Result};

/// Abstract byte writer with an absolute position counter.
pub trait Sink: Send {
    /// Append bytes and advance the position.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Current absolute offset (total bytes appended).
    fn position(&self) -> u64;

    /// Overwrite an already-written region without moving the position.
    ///
    /// The region `[offset, offset + bytes.len())` must lie entirely within
    /// the bytes written so far.
    fn patch(&mut self, offset: u64, bytes: &[u8]) -> Result<()>;

    /// Release the underlying resource. Further writes fail.
    fn close(&mut self) -> Result<()>;

    /// Downcast support for mode-specific functionality.
    fn as_any(&self) -> &dyn Any;

    /// Owned downcast support for mode-specific functionality.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Sink writing to a file on disk.
///
/// The file is opened exclusively: creation fails if the path already
/// exists, so an existing bag is never clobbered.
#[derive(Debug)]
pub struct FileSink {
    file: Option<std::fs::File>,
    pos: u64,
}

impl FileSink {
    /// Create the file at `path`, failing if it already exists.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    BagError::file_exists(path.display().to_string())
                } else {
                    BagError::io(format!("creating {}", path.display()), e)
                }
            })?;

        Ok(Self {
            file: Some(file),
            pos: 0,
        })
    }
}

impl Sink for FileSink {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Err(BagError::already_closed("write to file sink"));
        };
        file.write_all(bytes)
            .map_err(|e| BagError::io("appending to bag file", e))?;
        self.pos += bytes.len() as u64;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.pos
    }

    fn patch(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        if offset + bytes.len() as u64 > self.pos {
            return Err(BagError::io(
                "patching bag file",
                format!(
                    "patch range {}..{} exceeds written length {}",
                    offset,
                    offset + bytes.len() as u64,
                    self.pos
                ),
            ));
        }
        let Some(file) = self.file.as_mut() else {
            return Err(BagError::already_closed("patch file sink"));
        };
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| BagError::io("seeking in bag file", e))?;
        file.write_all(bytes)
            .map_err(|e| BagError::io("patching bag file", e))?;
        file.seek(SeekFrom::Start(self.pos))
            .map_err(|e| BagError::io("seeking in bag file", e))?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .map_err(|e| BagError::io("flushing bag file", e))?;
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Sink accumulating bytes in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    data: Vec<u8>,
    closed: bool,
}

impl MemorySink {
    /// Create an empty in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `close` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// View of the accumulated bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the accumulated bytes. Only valid after `close`.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        if !self.closed {
            return Err(BagError::NotClosed);
        }
        Ok(self.data)
    }
}

impl Sink for MemorySink {
    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        if self.closed {
            return Err(BagError::already_closed("write to memory sink"));
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.data.len() as u64
    }

    fn patch(&mut self, offset: u64, bytes: &[u8]) -> Result<()> {
        if self.closed {
            return Err(BagError::already_closed("patch memory sink"));
        }
        let start = offset as usize;
        let end = start + bytes.len();
        if end > self.data.len() {
            return Err(BagError::io(
                "patching memory sink",
                format!(
                    "patch range {}..{} exceeds written length {}",
                    start,
                    end,
                    self.data.len()
                ),
            ));
        }
        self.data[start..end].copy_from_slice(bytes);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
