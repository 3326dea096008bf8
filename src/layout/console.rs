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

use crate::Level;
use crate::color::ColorMode;
use crate::color::LevelColor;
use crate::layout::Layout;
use crate::layout::zoned;
use crate::record::Record;

/// A human-readable layout for terminals.
///
/// Output format:
///
/// ```text
/// ERRO[22:44:57.172] Hello error!
/// WARN[22:44:57.172] Hello warn!
/// INFO[22:44:57.172] src/main.rs:12 Hello info!
/// DEBU[22:44:57.172] Hello debug!
/// ```
///
/// The level tag is colored; by default the escapes are written even when the output is not a
/// terminal. The call site is printed only when the record carries one.
///
/// # Examples
///
/// ```
/// use tierlog::color::ColorMode;
/// use tierlog::layout::ConsoleLayout;
///
/// let layout = ConsoleLayout::default().color_mode(ColorMode::Never);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConsoleLayout {
    colors: LevelColor,
    mode: ColorMode,
    tz: Option<TimeZone>,
}

impl ConsoleLayout {
    /// Customize the color of each log level.
    pub fn colors(mut self, colors: LevelColor) -> Self {
        self.colors = colors;
        self
    }

    /// Set whether ANSI escapes are written.
    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the timezone for timestamps. Defaults to the system timezone.
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.tz = Some(tz);
        self
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Panic => "PANI",
        Level::Fatal => "FATA",
        Level::Error => "ERRO",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBU",
    }
}

impl Layout for ConsoleLayout {
    fn format(&self, record: &Record) -> anyhow::Result<Vec<u8>> {
        let time = zoned(record, self.tz.as_ref());
        let time = time.strftime("%H:%M:%S.%3f");
        let level = self
            .colors
            .colorize(self.mode, record.level(), level_tag(record.level()));
        let message = record.message().trim_end_matches('\n');

        let text = match record.caller() {
            Some(caller) => format!("{level}[{time}] {caller} {message}"),
            None => format!("{level}[{time}] {message}"),
        };
        Ok(text.into_bytes())
    }
}
