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

use jiff::tz::TimeZone;
use serde::Serialize;

use crate::layout::Layout;
use crate::layout::rfc3339_millis;
use crate::layout::zoned;
use crate::record::Record;

/// A JSON layout for formatting log records.
///
/// Output format:
///
/// ```json
/// {"time":"2024-08-11T22:44:57.172+08:00","level":"error","msg":"Hello error!"}
/// {"time":"2024-08-11T22:44:57.172+08:00","level":"info","msg":"Hello info!","caller":"src/main.rs:12"}
/// ```
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use tierlog::layout::JsonLayout;
///
/// let json_layout = JsonLayout::default().timezone(TimeZone::UTC);
/// ```
#[derive(Default, Debug, Clone)]
pub struct JsonLayout {
    tz: Option<TimeZone>,
}

impl JsonLayout {
    /// Sets the timezone for timestamps. Defaults to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
struct RecordLine<'a> {
    time: String,
    level: &'a str,
    msg: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    caller: Option<String>,
}

impl Layout for JsonLayout {
    fn format(&self, record: &Record) -> anyhow::Result<Vec<u8>> {
        let record_line = RecordLine {
            time: rfc3339_millis(&zoned(record, self.tz.as_ref())),
            level: record.level().as_str(),
            msg: record.message(),
            caller: record.caller(),
        };

        Ok(serde_json::to_vec(&record_line)?)
    }
}
