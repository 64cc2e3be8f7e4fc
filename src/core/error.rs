// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for rosbag-writer.
//!
//! All errors are fatal to the writer that raised them: a caller should
//! discard the writer after any `Err`. The underlying sink resource is
//! released either way.

use std::fmt;

/// Errors that can occur while producing a bag file.
#[derive(Debug, Clone)]
pub enum BagError {
    /// The output path already exists on disk
    FileExists {
        /// Path that was refused
        path: String,
    },

    /// An underlying sink operation failed
    Io {
        /// What was being written or patched
        context: String,
        /// Originating cause
        cause: String,
    },

    /// Operation requires the writer to be open
    NotOpen {
        /// Operation that was attempted
        operation: String,
    },

    /// Operation arrived after the writer (or its sink) was closed
    AlreadyClosed {
        /// Operation that was attempted
        operation: String,
    },

    /// No message definition or md5sum given, and the type has no
    /// predefined schema
    SchemaRequired {
        /// Message type that could not be resolved
        msgtype: String,
    },

    /// A connection with the identical six-field tuple already exists
    DuplicateConnection {
        /// Topic of the rejected connection
        topic: String,
    },

    /// Message written against a connection id this writer never issued
    UnknownConnection {
        /// Offending connection id
        id: u32,
    },

    /// Operation is only valid in the other destination mode
    WrongMode {
        /// Mode the operation requires
        expected: String,
    },

    /// Bytes requested before the writer was closed
    NotClosed,

    /// Unsupported feature or configuration value
    Unsupported {
        /// What is not supported
        feature: String,
    },
}

impl BagError {
    /// Create a "file exists" error.
    pub fn file_exists(path: impl Into<String>) -> Self {
        BagError::FileExists { path: path.into() }
    }

    /// Create an I/O error with the originating cause attached.
    pub fn io(context: impl Into<String>, cause: impl fmt::Display) -> Self {
        BagError::Io {
            context: context.into(),
            cause: cause.to_string(),
        }
    }

    /// Create a "not open" error.
    pub fn not_open(operation: impl Into<String>) -> Self {
        BagError::NotOpen {
            operation: operation.into(),
        }
    }

    /// Create an "already closed" error.
    pub fn already_closed(operation: impl Into<String>) -> Self {
        BagError::AlreadyClosed {
            operation: operation.into(),
        }
    }

    /// Create a "schema required" error.
    pub fn schema_required(msgtype: impl Into<String>) -> Self {
        BagError::SchemaRequired {
            msgtype: msgtype.into(),
        }
    }

    /// Create a "duplicate connection" error.
    pub fn duplicate_connection(topic: impl Into<String>) -> Self {
        BagError::DuplicateConnection {
            topic: topic.into(),
        }
    }

    /// Create an "unknown connection" error.
    pub fn unknown_connection(id: u32) -> Self {
        BagError::UnknownConnection { id }
    }

    /// Create a "wrong mode" error.
    pub fn wrong_mode(expected: impl Into<String>) -> Self {
        BagError::WrongMode {
            expected: expected.into(),
        }
    }

    /// Create an "unsupported" error.
    pub fn unsupported(feature: impl Into<String>) -> Self {
        BagError::Unsupported {
            feature: feature.into(),
        }
    }
}

impl fmt::Display for BagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BagError::FileExists { path } => {
                write!(f, "Refusing to overwrite existing file: {path}")
            }
            BagError::Io { context, cause } => {
                write!(f, "I/O error while {context}: {cause}")
            }
            BagError::NotOpen { operation } => {
                write!(f, "Cannot {operation}: writer is not open")
            }
            BagError::AlreadyClosed { operation } => {
                write!(f, "Cannot {operation}: writer is already closed")
            }
            BagError::SchemaRequired { msgtype } => {
                write!(
                    f,
                    "No message definition or md5sum for '{msgtype}' and no predefined schema"
                )
            }
            BagError::DuplicateConnection { topic } => {
                write!(f, "Duplicate connection on topic '{topic}'")
            }
            BagError::UnknownConnection { id } => {
                write!(f, "Unknown connection id {id}")
            }
            BagError::WrongMode { expected } => {
                write!(f, "Operation requires {expected} mode")
            }
            BagError::NotClosed => {
                write!(f, "Bag bytes are only available after close()")
            }
            BagError::Unsupported { feature } => {
                write!(f, "Unsupported feature: '{feature}'")
            }
        }
    }
}

impl std::error::Error for BagError {}

impl From<std::io::Error> for BagError {
    fn from(err: std::io::Error) -> Self {
        BagError::Io {
            context: "writing".to_string(),
            cause: err.to_string(),
        }
    }
}

/// Result type for rosbag-writer operations.
pub type Result<T> = std::result::Result<T, BagError>;
