//! # appfs Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! This module holds `FileUtils`, the set of whole-file operations appfs offers:
//! checking whether a path exists, reading a file or stream fully into memory
//! (as bytes or as text), and appending a CRLF-terminated line to a file,
//! creating the directory and the file first when needed.
//!
//! None of these operations return errors. Reads signal failure by returning
//! `None`; the append has no return channel at all. Every absorbed failure is
//! reported to the `DiagnosticSink` the `FileUtils` was built with.
//!
//! ## Architecture
//!
//! - **`read_stream`**: the single read primitive. Wraps any `Read` in a
//!   `BufReader` and drains it in `READ_CHUNK_SIZE` chunks into a `Vec<u8>`.
//! - **`read`**: opens a path and delegates to `read_stream`.
//! - **`read_string` / `read_string_stream`**: decode the bytes as UTF-8,
//!   replacing malformed sequences.
//! - **`write_txt_to_file`**: `make_file_path` (which calls `make_root_directory`),
//!   then an inline existence check that creates parents recursively, then an
//!   append at the current end of file.
//!
//! Directory creation differs between the two paths on purpose:
//! `make_root_directory` creates a single level only, while the inline check in
//! the write path uses `create_dir_all`. A nested missing directory therefore
//! logs a failure from the first step and is then created by the second.
//!
//! `file_name` must be a single normal path component. Absolute names, `..` and
//! nested names are rejected and logged before anything touches the disk, so a
//! write never lands outside `directory`.
//!
//! File creation is create-if-absent (`create_new`), so it never truncates. The
//! existence check that precedes it is still racy: two concurrent appenders can
//! both see a missing file, and their lines may interleave.
//!
//! Files, buffered readers and the in-memory buffer are all scoped to the call
//! and released on every return path.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io::FileUtils;
//! use std::path::Path;
//!
//! let utils: FileUtils = FileUtils::default(); // Logs through `tracing`.
//! utils.write_txt_to_file("service started", Path::new("/var/log/app"), "events.log");
//! if let Some(text) = utils.read_string("/var/log/app/events.log") {
//!     println!("{text}");
//! }
//! ```
//!
use crate::common::diagnostics::{DiagnosticSink, TracingSink};
use crate::core::error::AppfsError;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

/// Size of each read while draining a stream.
pub const READ_CHUNK_SIZE: usize = 1024;

/// Appended after every line written by `write_txt_to_file`.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Whole-file read and append operations that absorb and log their failures.
///
/// Holds no state besides the diagnostic sink; every call stands alone.
#[derive(Debug, Default, Clone)]
pub struct FileUtils<D = TracingSink> {
    sink: D,
}

impl<D: DiagnosticSink> FileUtils<D> {
    /// Creates a `FileUtils` reporting to `sink`.
    pub fn new(sink: D) -> Self {
        FileUtils { sink }
    }

    pub(crate) fn sink(&self) -> &D {
        &self.sink
    }

    /// Returns `true` if a filesystem entry exists at `path`. Nothing is cached.
    pub fn is_exist(&self, path: impl AsRef<Path>) -> bool {
        path.as_ref().exists()
    }

    /// Reads the whole file at `path`.
    ///
    /// Returns `None` if the file cannot be opened or read; the failure is logged
    /// at `error` exactly once.
    pub fn read(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        let path = path.as_ref();
        match File::open(path) {
            // The file handle is dropped when `read_stream` returns.
            Ok(file) => self.read_stream(file),
            Err(source) => {
                let err = AppfsError::io("open", path, source);
                self.sink.error("read file exception", Some(&err));
                None
            }
        }
    }

    /// Drains `stream` to end-of-stream and returns everything it produced.
    ///
    /// Pass `&mut reader` to keep ownership of a caller-supplied stream.
    /// Interrupted reads are retried; any other I/O error is logged at `error`
    /// and yields `None`, discarding whatever was read so far.
    pub fn read_stream<R: Read>(&self, stream: R) -> Option<Vec<u8>> {
        let mut reader = BufReader::new(stream);
        let mut bytes = Vec::new();
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            match reader.read(&mut chunk) {
                Ok(0) => break, // End of stream.
                Ok(len) => bytes.extend_from_slice(&chunk[..len]),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.sink.error("read IO exception", Some(&err));
                    return None;
                }
            }
        }
        Some(bytes)
    }

    /// `read(path)` decoded as text.
    pub fn read_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.read(path).map(decode)
    }

    /// `read_stream(stream)` decoded as text.
    pub fn read_string_stream<R: Read>(&self, stream: R) -> Option<String> {
        self.read_stream(stream).map(decode)
    }

    /// Appends `content` plus CRLF to `directory/file_name`.
    ///
    /// Creates the directory and the file if they are missing. Best effort: every
    /// failure is logged and swallowed, so a caller cannot tell a failed append
    /// from a successful one. A `file_name` that is not a single path component
    /// is logged at `error` and nothing is written.
    pub fn write_txt_to_file(&self, content: &str, directory: impl AsRef<Path>, file_name: &str) {
        let directory = directory.as_ref();
        if let Err(err) = check_file_name(file_name) {
            self.sink.error("write file rejected", Some(&err));
            return;
        }
        // The directory has to exist before the file can be created in it.
        self.make_file_path(directory, file_name);

        let target = directory.join(file_name);
        let line = format!("{content}{LINE_TERMINATOR}");
        if let Err(err) = self.append_line(&target, &line) {
            self.sink
                .debug(&format!("Error on write File: {}", target.display()), Some(&err));
        }
    }

    fn append_line(&self, target: &Path, line: &str) -> Result<(), AppfsError> {
        if !target.exists() {
            self.sink
                .debug(&format!("Create the file: {}", target.display()), None);
            if let Some(parent) = target.parent() {
                // Recursive, unlike `make_root_directory`.
                fs::create_dir_all(parent)
                    .map_err(|e| AppfsError::io("create directory", parent, e))?;
            }
            create_if_absent(target).map_err(|e| AppfsError::io("create file", target, e))?;
        }

        let mut file = OpenOptions::new()
            .write(true)
            .open(target)
            .map_err(|e| AppfsError::io("open", target, e))?;
        let end = file
            .metadata()
            .map_err(|e| AppfsError::io("stat", target, e))?
            .len();
        file.seek(SeekFrom::Start(end))
            .map_err(|e| AppfsError::io("seek in", target, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| AppfsError::io("write to", target, e))?;
        // Content reaches the device before the handle is released.
        file.sync_data()
            .map_err(|e| AppfsError::io("sync", target, e))?;
        Ok(())
    }

    /// Makes sure `directory` and `directory/file_name` exist.
    ///
    /// Returns the file path, or `None` if the file could not be created.
    pub(crate) fn make_file_path(&self, directory: &Path, file_name: &str) -> Option<PathBuf> {
        if let Err(err) = check_file_name(file_name) {
            self.sink.error("make file path exception", Some(&err));
            return None;
        }
        self.make_root_directory(directory);
        let target = directory.join(file_name);
        if !target.exists() {
            if let Err(source) = create_if_absent(&target) {
                let err = AppfsError::io("create file", &target, source);
                self.sink.error("make file path exception", Some(&err));
                return None;
            }
        }
        Some(target)
    }

    /// Creates `directory` if it is missing. Single level only: missing parents
    /// make this fail, and the failure is logged at `info`.
    pub(crate) fn make_root_directory(&self, directory: &Path) {
        if directory.exists() {
            return;
        }
        if let Err(source) = fs::create_dir(directory) {
            let err = AppfsError::io("create directory", directory, source);
            self.sink.info("make root directory error", Some(&err));
        }
    }
}

/// Accepts only names that `Path::join` keeps inside the directory.
fn check_file_name(file_name: &str) -> Result<(), AppfsError> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(AppfsError::InvalidFileName {
            file_name: file_name.to_string(),
        }),
    }
}

/// Creates an empty file unless something already exists at `path`.
fn create_if_absent(path: &Path) -> std::io::Result<()> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(()),
        // Lost the race against another creator; the file is there either way.
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(err),
    }
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}
