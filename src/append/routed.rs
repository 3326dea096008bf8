// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Appender splitting records into an `.out` and an `.err` file by severity.
//!
//! # Example
//!
//! ```
//! use tierlog::Level;
//! use tierlog::Logger;
//! use tierlog::append::RoutedFile;
//! use tierlog::append::SeverityRouter;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let router = SeverityRouter::new(dir.path(), "app");
//! let logger = Logger::builder()
//!     .max_level(Level::Debug)
//!     .append(RoutedFile::new(router))
//!     .build();
//!
//! logger.warn("goes to app.out", &[]);
//! logger.error("goes to app.err", &[]);
//! ```

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;

use crate::Level;
use crate::append::Append;
use crate::layout::Layout;
use crate::layout::LogfmtLayout;
use crate::record::Record;

/// Maps a severity level to the file its records belong to.
///
/// Debug, Info and Warn go to `<dir>/<file_name>.out`, Error and Fatal to
/// `<dir>/<file_name>.err`. Panic records are not routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityRouter {
    out: PathBuf,
    err: PathBuf,
}

impl SeverityRouter {
    /// Creates a router for `<dir>/<file_name>.out` and `<dir>/<file_name>.err`.
    pub fn new(dir: impl AsRef<Path>, file_name: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            out: dir.join(format!("{file_name}.out")),
            err: dir.join(format!("{file_name}.err")),
        }
    }

    /// The destination of a record at `level`, if any.
    ///
    /// ```
    /// use std::path::Path;
    ///
    /// use tierlog::Level;
    /// use tierlog::append::SeverityRouter;
    ///
    /// let router = SeverityRouter::new("/var/log", "app");
    /// assert_eq!(router.route(Level::Warn), Some(Path::new("/var/log/app.out")));
    /// assert_eq!(router.route(Level::Fatal), Some(Path::new("/var/log/app.err")));
    /// assert_eq!(router.route(Level::Panic), None);
    /// ```
    pub fn route(&self, level: Level) -> Option<&Path> {
        match level {
            Level::Debug | Level::Info | Level::Warn => Some(self.out.as_path()),
            Level::Error | Level::Fatal => Some(self.err.as_path()),
            Level::Panic => None,
        }
    }

    /// The file for Debug, Info and Warn records.
    pub fn out_path(&self) -> &Path {
        &self.out
    }

    /// The file for Error and Fatal records.
    pub fn err_path(&self) -> &Path {
        &self.err
    }
}

// A file that is only created on its first write.
#[derive(Debug)]
struct LazyFile {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl LazyFile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            file: Mutex::new(None),
        }
    }

    fn write_all(&self, bytes: &[u8]) -> anyhow::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if file.is_none() {
            let opened = OpenOptions::new()
                .append(true)
                .create(true)
                .open(&self.path)
                .with_context(|| format!("failed to open log file: {}", self.path.display()))?;
            *file = Some(opened);
        }
        if let Some(file) = file.as_mut() {
            file.write_all(bytes)?;
        }
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(file) = file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// An appender that writes each record to the file chosen by a [`SeverityRouter`].
///
/// Files are opened in append mode on first use. The directory must already exist.
#[derive(Debug)]
pub struct RoutedFile {
    layout: Box<dyn Layout>,
    out: LazyFile,
    err: LazyFile,
}

impl RoutedFile {
    /// Creates a new [`RoutedFile`] appender.
    ///
    /// This appender by default uses [`LogfmtLayout`] to format log records.
    pub fn new(router: SeverityRouter) -> Self {
        Self {
            layout: Box::new(LogfmtLayout::default()),
            out: LazyFile::new(router.out),
            err: LazyFile::new(router.err),
        }
    }

    /// Sets the layout used to format log records.
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    fn route(&self, level: Level) -> Option<&LazyFile> {
        match level {
            Level::Debug | Level::Info | Level::Warn => Some(&self.out),
            Level::Error | Level::Fatal => Some(&self.err),
            Level::Panic => None,
        }
    }
}

impl Append for RoutedFile {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let Some(file) = self.route(record.level()) else {
            return Ok(());
        };
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        file.write_all(&bytes)
    }

    fn flush(&self) -> anyhow::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }
}
