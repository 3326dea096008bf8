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

//! Color utilities.

use colored::Color;
use colored::Colorize;

use crate::Level;

/// Colors for different log levels.
#[derive(Debug, Clone)]
pub struct LevelColor {
    /// Color for panic level logs.
    pub panic: Color,
    /// Color for fatal level logs.
    pub fatal: Color,
    /// Color for error level logs.
    pub error: Color,
    /// Color for warning level logs.
    pub warn: Color,
    /// Color for info level logs.
    pub info: Color,
    /// Color for debug level logs.
    pub debug: Color,
}

impl Default for LevelColor {
    fn default() -> Self {
        Self {
            panic: Color::Red,
            fatal: Color::Red,
            error: Color::Red,
            warn: Color::Yellow,
            info: Color::Cyan,
            debug: Color::White,
        }
    }
}

/// How the console decides whether to emit ANSI escapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Always emit escapes, even when stdout is not a terminal.
    #[default]
    Always,
    /// Follow `colored`'s detection (`NO_COLOR`, `CLICOLOR`, tty).
    Auto,
    /// Never emit escapes.
    Never,
}

impl LevelColor {
    /// The color of the given level.
    pub fn of(&self, level: Level) -> Color {
        match level {
            Level::Panic => self.panic,
            Level::Fatal => self.fatal,
            Level::Error => self.error,
            Level::Warn => self.warn,
            Level::Info => self.info,
            Level::Debug => self.debug,
        }
    }

    /// Colorize a text in the color of the level.
    pub fn colorize(&self, mode: ColorMode, level: Level, text: &str) -> String {
        let color = self.of(level);
        match mode {
            ColorMode::Never => text.to_string(),
            ColorMode::Auto => text.color(color).to_string(),
            // `colored` has no per-string override, so forced color writes the escapes itself.
            ColorMode::Always => format!("\x1b[{}m{text}\x1b[0m", color.to_fg_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_modes() {
        let colors = LevelColor::default();
        assert_eq!(
            colors.colorize(ColorMode::Always, Level::Error, "ERRO"),
            "\x1b[31mERRO\x1b[0m"
        );
        assert_eq!(
            colors.colorize(ColorMode::Always, Level::Info, "INFO"),
            "\x1b[36mINFO\x1b[0m"
        );
        assert_eq!(colors.colorize(ColorMode::Never, Level::Warn, "WARN"), "WARN");
    }
}
