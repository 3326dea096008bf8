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

use crate::append::Append;
use crate::layout::ConsoleLayout;
use crate::layout::Layout;
use crate::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Stream {
    #[default]
    Stdout,
    Stderr,
}

/// An appender that prints log records to stdout (or stderr).
///
/// Uses a colored [`ConsoleLayout`] unless another layout is set.
///
/// # Examples
///
/// ```
/// use tierlog::append::Console;
///
/// let console = Console::default();
/// let stderr = Console::stderr();
/// ```
#[derive(Debug)]
pub struct Console {
    stream: Stream,
    layout: Box<dyn Layout>,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            stream: Stream::Stdout,
            layout: Box::new(ConsoleLayout::default()),
        }
    }
}

impl Console {
    /// A console appender writing to stderr.
    pub fn stderr() -> Self {
        Self {
            stream: Stream::Stderr,
            ..Self::default()
        }
    }

    /// Sets the layout used to format log records.
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }
}

impl Append for Console {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        let mut bytes = self.layout.format(record)?;
        bytes.push(b'\n');
        match self.stream {
            Stream::Stdout => std::io::stdout().lock().write_all(&bytes)?,
            Stream::Stderr => std::io::stderr().lock().write_all(&bytes)?,
        }
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush()?,
            Stream::Stderr => std::io::stderr().flush()?,
        }
        Ok(())
    }
}
