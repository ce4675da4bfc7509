//! Result-file writers.
//!
//! [`GeneralWriter`] owns at most one live file handle for a named path. The
//! handle is acquired by [`GeneralWriter::open`], held across writes, and
//! released by [`GeneralWriter::close`] or when the writer is dropped, so
//! [`GeneralWriter::is_open`] always reflects a real handle.
//!
//! [`HitWriter`] builds on it to emit one tab-separated record per detected
//! hit.
//!
//! # Example
//!
//! ```no_run
//! use driftkit::writer::{FileMode, GeneralWriter};
//!
//! let mut w = GeneralWriter::new("hits.log", FileMode::Write);
//! w.open(None)?;
//! w.write("first line\n")?;
//! w.open(Some(FileMode::Read))?;
//! assert_eq!(w.read_to_string()?, "first line\n");
//! # Ok::<(), driftkit::Error>(())
//! ```

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, trace};

use crate::{Error, Result};

mod hits;

pub use hits::{Hit, HitWriter};

/// File access mode, with the usual text-file `a` / `w` / `r` semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// Create if missing, every write goes to the end
    #[default]
    Append,
    /// Create or truncate, then write from the start
    Write,
    /// Read from the start; the file must exist
    Read,
}

impl FileMode {
    pub fn as_str(self) -> &'static str {
        match self {
            FileMode::Append => "a",
            FileMode::Write => "w",
            FileMode::Read => "r",
        }
    }

    pub fn is_writable(self) -> bool {
        matches!(self, FileMode::Append | FileMode::Write)
    }

    pub fn is_readable(self) -> bool {
        self == FileMode::Read
    }

    fn options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        match self {
            FileMode::Append => opts.append(true).create(true),
            FileMode::Write => opts.write(true).create(true).truncate(true),
            FileMode::Read => opts.read(true),
        };
        opts
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "a" | "append" => Ok(FileMode::Append),
            "w" | "write" => Ok(FileMode::Write),
            "r" | "read" => Ok(FileMode::Read),
            _ => Err(format!("unknown file mode '{s}' (expected a, w or r)")),
        }
    }
}

/// A named file with an explicit open/closed lifecycle.
#[derive(Debug)]
pub struct GeneralWriter {
    path: PathBuf,
    /// Mode of the live handle, or the mode the next `open(None)` will use
    mode: FileMode,
    handle: Option<File>,
}

impl GeneralWriter {
    /// Create a closed writer for `path`. No I/O happens until [`open`](Self::open).
    ///
    /// A leading `~` in `path` expands to the home directory.
    pub fn new<P: AsRef<Path>>(path: P, mode: FileMode) -> Self {
        Self {
            path: crate::expanduser(path.as_ref().to_path_buf()),
            mode,
            handle: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Open the file, reusing the configured mode when `mode` is `None`.
    ///
    /// If a handle is already live in the requested mode it is kept. A read
    /// handle is rewound to the start. Append and write handles keep their
    /// position, and a write handle is not truncated again; use
    /// [`start_over`](Self::start_over) for that. A live handle in another
    /// mode is closed before reopening.
    pub fn open(&mut self, mode: Option<FileMode>) -> Result<()> {
        let mode = mode.unwrap_or(self.mode);
        if let Some(file) = self.handle.as_mut() {
            if self.mode == mode {
                if mode == FileMode::Read {
                    file.seek(SeekFrom::Start(0))?;
                }
                trace!(path = %self.path.display(), %mode, "already open");
                return Ok(());
            }
            self.close();
        }

        let file = mode.options().open(&self.path)?;
        debug!(path = %self.path.display(), %mode, "opened");
        self.handle = Some(file);
        self.mode = mode;
        Ok(())
    }

    /// Release the handle. Closing a closed writer is a no-op.
    pub fn close(&mut self) {
        if let Some(mut file) = self.handle.take() {
            if let Err(e) = file.flush() {
                debug!(path = %self.path.display(), "flush on close failed: {}", e);
            }
            debug!(path = %self.path.display(), "closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// True when a handle is live and its mode permits writing.
    pub fn writable(&self) -> bool {
        self.is_open() && self.mode.is_writable()
    }

    /// Write `text` at the current position of the live handle.
    pub fn write(&mut self, text: &str) -> Result<()> {
        let mode = self.mode;
        let file = self
            .handle
            .as_mut()
            .ok_or_else(|| Error::NotOpen(self.path.clone()))?;
        if !mode.is_writable() {
            return Err(Error::NotWritable {
                path: self.path.clone(),
                mode,
            });
        }
        file.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Read the rest of the file from a handle opened in [`FileMode::Read`].
    pub fn read_to_string(&mut self) -> Result<String> {
        let mode = self.mode;
        let file = self
            .handle
            .as_mut()
            .ok_or_else(|| Error::NotOpen(self.path.clone()))?;
        if !mode.is_readable() {
            return Err(Error::NotReadable {
                path: self.path.clone(),
                mode,
            });
        }
        let mut text = String::new();
        file.read_to_string(&mut text)?;
        Ok(text)
    }

    /// Truncate the file to zero length, whether or not a handle is live.
    ///
    /// A live handle is rewound to the start so later writes and reads see
    /// the emptied file.
    pub fn start_over(&mut self) -> Result<()> {
        FileMode::Write.options().open(&self.path)?;
        if let Some(file) = self.handle.as_mut() {
            file.seek(SeekFrom::Start(0))?;
        }
        debug!(path = %self.path.display(), "truncated");
        Ok(())
    }
}

impl Drop for GeneralWriter {
    fn drop(&mut self) {
        self.close();
    }
}
