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

//! Layouts for formatting log records.

use std::fmt;

use jiff::Zoned;
use jiff::tz::TimeZone;

use crate::config::Encoding;
use crate::record::Record;

mod console;
mod json;
mod logfmt;

pub use self::console::ConsoleLayout;
pub use self::json::JsonLayout;
pub use self::logfmt::LogfmtLayout;

/// A layout for formatting log records.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Formats a log record, without the trailing newline.
    fn format(&self, record: &Record) -> anyhow::Result<Vec<u8>>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// The layout used by file sinks for the given encoding.
pub fn file_layout(encoding: Encoding) -> Box<dyn Layout> {
    match encoding {
        Encoding::Json => Box::new(JsonLayout::default()),
        Encoding::Text => Box::new(LogfmtLayout::default()),
    }
}

fn zoned(record: &Record, tz: Option<&TimeZone>) -> Zoned {
    match tz {
        Some(tz) => record.time().to_zoned(tz.clone()),
        None => record.time().to_zoned(TimeZone::system()),
    }
}

// RFC 3339 with milliseconds, e.g. 2024-08-11T22:44:57.172+08:00
fn rfc3339_millis(time: &Zoned) -> String {
    time.strftime("%Y-%m-%dT%H:%M:%S.%3f%:z").to_string()
}
