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

use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use crate::append::Append;
use crate::append::rolling_file::RollingFileWriter;
use crate::append::rolling_file::RollingFileWriterBuilder;
use crate::config::Retention;
use crate::layout::Layout;
use crate::layout::LogfmtLayout;
use crate::record::Record;

/// A builder to configure and create a [`RollingFile`] appender.
#[derive(Debug)]
pub struct RollingFileBuilder {
    builder: RollingFileWriterBuilder,
    layout: Box<dyn Layout>,
}

impl RollingFileBuilder {
    /// Creates a new [`RollingFileBuilder`].
    ///
    /// Uses [`LogfmtLayout`] unless another layout is set.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            builder: RollingFileWriterBuilder::new(dir, file_name),
            layout: Box::new(LogfmtLayout::default()),
        }
    }

    /// Sets the length of a time bucket.
    #[must_use]
    pub fn rotation_interval(mut self, interval: Duration) -> Self {
        self.builder = self.builder.rotation_interval(interval);
        self
    }

    /// Sets which old files are removed when a new bucket starts.
    #[must_use]
    pub fn retention(mut self, retention: Retention) -> Self {
        self.builder = self.builder.retention(retention);
        self
    }

    /// Sets the layout used to format log records.
    #[must_use]
    pub fn layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Builds the [`RollingFile`] appender.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer cannot be created.
    pub fn build(self) -> anyhow::Result<RollingFile> {
        let Self { builder, layout } = self;
        let writer = builder.build()?;
        Ok(RollingFile {
            writer: Mutex::new(writer),
            layout,
        })
    }
}

/// An appender that writes log records to time-bucketed rolling files.
#[derive(Debug)]
pub struct RollingFile {
    writer: Mutex<RollingFileWriter>,
    layout: Box<dyn Layout>,
}

impl RollingFile {
    fn writer(&self) -> MutexGuard<'_, RollingFileWriter> {
        self.writer.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The path of the file currently written to.
    pub fn current_path(&self) -> PathBuf {
        self.writer().current_path().to_path_buf()
    }
}

impl Append for RollingFile {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        self.writer().write_all(&bytes)?;
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        self.writer().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::Level;

    #[test]
    fn test_append_writes_formatted_line() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let rolling = RollingFileBuilder::new(temp_dir.path(), "app")
            .build()
            .unwrap();

        rolling
            .append(&Record::new(Level::Warn, "disk is almost full"))
            .unwrap();
        rolling.append(&Record::new(Level::Info, "second")).unwrap();
        rolling.flush().unwrap();

        let content = fs::read_to_string(rolling.current_path()).unwrap();
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("level=warn"), "{}", lines[0]);
        assert!(lines[0].contains("msg=\"disk is almost full\""), "{}", lines[0]);
        assert!(lines[1].contains("msg=second"), "{}", lines[1]);
    }
}
