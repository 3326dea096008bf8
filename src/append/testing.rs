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

use std::sync::Arc;
use std::sync::Mutex;

use crate::Level;
use crate::append::Append;
use crate::record::Record;

/// An appender that keeps every record in memory, for asserting on emitted logs in tests.
///
/// Clones share the same buffer, so a clone can be handed to the logger while the original
/// is kept for inspection.
///
/// # Examples
///
/// ```
/// use tierlog::Level;
/// use tierlog::Logger;
/// use tierlog::append::Testing;
///
/// let captured = Testing::default();
/// let logger = Logger::builder()
///     .max_level(Level::Debug)
///     .append(captured.clone())
///     .build();
///
/// logger.info("hello %v", &[&"world"]);
/// assert_eq!(captured.messages(), vec!["hello world".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Testing {
    records: Arc<Mutex<Vec<(Level, String)>>>,
}

impl Testing {
    /// The captured records, oldest first.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The captured messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.records()
            .into_iter()
            .map(|(_, message)| message)
            .collect()
    }
}

impl Append for Testing {
    fn append(&self, record: &Record) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((record.level(), record.message().to_string()));
        Ok(())
    }
}
