//! # appfs Diagnostic Sink
//!
//! File: cli/src/common/diagnostics.rs
//!
//! ## Overview
//!
//! The storage utilities report every failure they absorb to a diagnostic sink
//! handed to them at construction, instead of a process-wide logger. The sink
//! accepts `debug`, `info` and `error` messages, each optionally paired with the
//! error value that caused it. It is used purely for its side effect; nothing in
//! `common::fs` branches on what the sink does.
//!
//! ## Architecture
//!
//! - **`DiagnosticSink`**: the capability trait. Implementors provide `log`; the
//!   level helpers are provided methods.
//! - **`TracingSink`**: the production sink. Forwards to the `tracing` macros under
//!   the `appfs::fs` target, with the error attached as the `error` field.
//! - **`RecordingSink`** (tests only): keeps every entry in memory so tests can
//!   count and inspect them.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::diagnostics::{DiagnosticSink, TracingSink};
//!
//! let sink = TracingSink;
//! sink.error("read file exception", Some(&err));
//! sink.debug("Create the file: /tmp/log.txt", None);
//! ```
//!
use std::error::Error as StdError;
use tracing::Level;

/// Target used for every event emitted by [`TracingSink`].
pub const FS_LOG_TARGET: &str = "appfs::fs";

/// Receives leveled diagnostic messages from the storage utilities.
pub trait DiagnosticSink {
    /// Records one message at `level`, optionally with the error that caused it.
    fn log(&self, level: Level, message: &str, error: Option<&dyn StdError>);

    fn debug(&self, message: &str, error: Option<&dyn StdError>) {
        self.log(Level::DEBUG, message, error);
    }

    fn info(&self, message: &str, error: Option<&dyn StdError>) {
        self.log(Level::INFO, message, error);
    }

    fn error(&self, message: &str, error: Option<&dyn StdError>) {
        self.log(Level::ERROR, message, error);
    }
}

// Lets callers lend a sink they keep inspecting (e.g. `FileUtils::new(&sink)`).
impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &T {
    fn log(&self, level: Level, message: &str, error: Option<&dyn StdError>) {
        (**self).log(level, message, error);
    }
}

/// Diagnostic sink backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

macro_rules! emit {
    ($macro:ident, $message:expr, $error:expr) => {
        match $error {
            Some(err) => tracing::$macro!(target: FS_LOG_TARGET, error = %err, "{}", $message),
            None => tracing::$macro!(target: FS_LOG_TARGET, "{}", $message),
        }
    };
}

impl DiagnosticSink for TracingSink {
    fn log(&self, level: Level, message: &str, error: Option<&dyn StdError>) {
        if level == Level::ERROR {
            emit!(error, message, error);
        } else if level == Level::WARN {
            emit!(warn, message, error);
        } else if level == Level::INFO {
            emit!(info, message, error);
        } else if level == Level::DEBUG {
            emit!(debug, message, error);
        } else {
            emit!(trace, message, error);
        }
    }
}

/// One entry captured by [`RecordingSink`].
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
    /// The paired error rendered with `Display`.
    pub error: Option<String>,
}

/// In-memory sink for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: std::cell::RefCell<Vec<Record>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|record| record.level == level)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }
}

#[cfg(test)]
impl DiagnosticSink for RecordingSink {
    fn log(&self, level: Level, message: &str, error: Option<&dyn StdError>) {
        self.records.borrow_mut().push(Record {
            level,
            message: message.to_string(),
            error: error.map(|err| err.to_string()),
        });
    }
}
