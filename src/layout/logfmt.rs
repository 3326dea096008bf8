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

use std::fmt::Write;

use jiff::tz::TimeZone;

use crate::layout::Layout;
use crate::layout::rfc3339_millis;
use crate::layout::zoned;
use crate::record::Record;

/// A logfmt layout, used by file sinks for the `text` encoding.
///
/// Output format:
///
/// ```text
/// time=2024-08-11T22:44:57.172+08:00 level=error msg="Hello error!"
/// time=2024-08-11T22:44:57.172+08:00 level=warn msg="Hello warn!"
/// time=2024-08-11T22:44:57.172+08:00 level=info msg="Hello info!" caller=src/main.rs:12
/// ```
///
/// # Examples
///
/// ```
/// use jiff::tz::TimeZone;
/// use tierlog::layout::LogfmtLayout;
///
/// let logfmt_layout = LogfmtLayout::default().timezone(TimeZone::UTC);
/// ```
#[derive(Default, Debug, Clone)]
pub struct LogfmtLayout {
    tz: Option<TimeZone>,
}

impl LogfmtLayout {
    /// Sets the timezone for timestamps. Defaults to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

// The encode logic follows https://github.com/go-logfmt/logfmt/blob/76262ea7/encode.go.
fn encode_key_value(result: &mut String, key: &str, value: &str) -> anyhow::Result<()> {
    if key.contains([' ', '=', '"']) {
        anyhow::bail!("key contains special chars: {key}");
    }

    if !result.is_empty() {
        result.push(' ');
    }

    if value.is_empty() || value.contains([' ', '=', '"', '\n', '\r', '\t']) {
        write!(result, "{key}=\"{}\"", value.escape_debug())?;
    } else {
        write!(result, "{key}={value}")?;
    }

    Ok(())
}

impl Layout for LogfmtLayout {
    fn format(&self, record: &Record) -> anyhow::Result<Vec<u8>> {
        let time = rfc3339_millis(&zoned(record, self.tz.as_ref()));

        let mut text = String::new();
        encode_key_value(&mut text, "time", &time)?;
        encode_key_value(&mut text, "level", record.level().as_str())?;
        encode_key_value(&mut text, "msg", record.message())?;
        if let Some(caller) = record.caller() {
            encode_key_value(&mut text, "caller", &caller)?;
        }

        Ok(text.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use jiff::Timestamp;

    use super::*;
    use crate::Level;

    fn format(record: &Record) -> String {
        let layout = LogfmtLayout::default().timezone(TimeZone::UTC);
        String::from_utf8(layout.format(record).unwrap()).unwrap()
    }

    #[test]
    fn test_logfmt_format() {
        let now = Timestamp::from_str("2024-08-11T22:44:57.172105Z").unwrap();

        let record = Record::new(Level::Info, "ready").with_time(now);
        assert_eq!(
            format(&record),
            "time=2024-08-11T22:44:57.172+00:00 level=info msg=ready"
        );

        let record = Record::new(Level::Error, "open \"db\" failed").with_time(now);
        assert_eq!(
            format(&record),
            r#"time=2024-08-11T22:44:57.172+00:00 level=error msg="open \"db\" failed""#
        );
    }

    #[test]
    fn test_logfmt_escapes_newline() {
        let now = Timestamp::from_str("2024-08-11T00:00:00Z").unwrap();
        let record = Record::new(Level::Warn, "a b\n").with_time(now);
        assert_eq!(
            format(&record),
            r#"time=2024-08-11T00:00:00.000+00:00 level=warn msg="a b\n""#
        );
    }

    #[test]
    fn test_logfmt_rejects_bad_key() {
        let mut text = String::new();
        assert!(encode_key_value(&mut text, "bad key", "v").is_err());
    }
}
