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

//! Logger configuration.
//!
//! [`Config`] is the user-facing option set. Every field has a default, and empty or zero
//! values fall back to it, so `Config::default()` (or any partially filled value) is usable
//! as is. [`Config::resolve`] turns it into the fully populated [`Settings`] the logger is
//! built from.
//!
//! ```
//! use tierlog::Config;
//!
//! let config: Config = serde_json::from_str(r#"{"level": "warn", "write": true}"#).unwrap();
//! assert_eq!(config.file_name, "goapp");
//! assert_eq!(config.rotation_time, 168);
//! ```

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::Level;

/// The level used when the option is left empty.
pub const DEFAULT_LEVEL: &str = "info";
/// The file encoding used when the option is left empty.
pub const DEFAULT_FORMATTER: &str = "text";
/// The base file name used when the option is left empty.
pub const DEFAULT_FILE_NAME: &str = "goapp";
/// The `max_age` sentinel that selects count-based retention.
pub const MAX_AGE_USE_COUNT: i64 = -1;
/// The rotation interval in hours used when the option is zero.
pub const DEFAULT_ROTATION_HOURS: u64 = 7 * 24;

const SECONDS_PER_HOUR: u64 = 60 * 60;

/// The recognized logger options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// One of `panic`, `fatal`, `error`, `warn`, `info`, `debug`. Unrecognized names select
    /// `debug`.
    pub level: String,
    /// `json` for JSON files; anything else writes logfmt text. The console is unaffected.
    pub formatter: String,
    /// Whether to write log files in addition to the console.
    pub write: bool,
    /// The directory of the log files. Defaults to the OS temporary directory.
    pub path: PathBuf,
    /// The base name of the log files.
    pub file_name: String,
    /// Retention in hours. [`MAX_AGE_USE_COUNT`] (or any value that is not positive) keeps
    /// `rotation_count` files instead.
    pub max_age: i64,
    /// Files to keep when `max_age` is the sentinel. Zero keeps every file.
    pub rotation_count: u32,
    /// Hours between two rotations of the time-bucketed file.
    pub rotation_time: u64,
    /// Capture the file and line of every log call.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            formatter: DEFAULT_FORMATTER.to_string(),
            write: false,
            path: std::env::temp_dir(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            max_age: MAX_AGE_USE_COUNT,
            rotation_count: 0,
            rotation_time: DEFAULT_ROTATION_HOURS,
            debug: false,
        }
    }
}

/// The encoding of file sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// logfmt text.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl Encoding {
    /// Resolve an encoding name. Only `json` selects [`Encoding::Json`].
    pub fn from_name(name: &str) -> Encoding {
        if name == "json" {
            Encoding::Json
        } else {
            Encoding::Text
        }
    }
}

/// Which time-bucketed files survive a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    /// Never delete old files.
    Forever,
    /// Delete files last modified longer ago than the duration.
    MaxAge(Duration),
    /// Keep the given number of most recent files.
    Count(NonZeroUsize),
}

/// File sink settings, present only when file output is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSettings {
    /// The directory of the log files.
    pub dir: PathBuf,
    /// The base name of the log files.
    pub file_name: String,
    /// The retention policy of the time-bucketed files.
    pub retention: Retention,
    /// The length of a time bucket.
    pub rotation_interval: Duration,
}

/// A fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The most verbose level that is emitted.
    pub level: Level,
    /// The encoding of file sinks.
    pub encoding: Encoding,
    /// File output, if enabled.
    pub files: Option<FileSettings>,
    /// Whether call sites are captured.
    pub debug: bool,
}

impl Config {
    /// Merge the options over the defaults and resolve names into typed values.
    ///
    /// This never fails: unknown names fall back as documented on each field.
    pub fn resolve(&self) -> Settings {
        let level = if self.level.is_empty() {
            DEFAULT_LEVEL
        } else {
            self.level.as_str()
        };
        let level = Level::parse_or_most_verbose(level);

        let files = self.write.then(|| FileSettings {
            dir: if self.path.as_os_str().is_empty() {
                std::env::temp_dir()
            } else {
                self.path.clone()
            },
            file_name: if self.file_name.is_empty() {
                DEFAULT_FILE_NAME.to_string()
            } else {
                self.file_name.clone()
            },
            retention: self.retention(),
            rotation_interval: self.rotation_interval(),
        });

        Settings {
            level,
            encoding: Encoding::from_name(&self.formatter),
            files,
            debug: self.debug,
        }
    }

    /// The retention policy selected by `max_age` and `rotation_count`.
    ///
    /// A positive `max_age` takes precedence over `rotation_count`.
    pub fn retention(&self) -> Retention {
        if self.max_age > 0 {
            let hours = self.max_age.unsigned_abs();
            return Retention::MaxAge(Duration::from_secs(
                hours.saturating_mul(SECONDS_PER_HOUR),
            ));
        }

        match NonZeroUsize::new(self.rotation_count as usize) {
            Some(count) => Retention::Count(count),
            None => Retention::Forever,
        }
    }

    /// The rotation interval, defaulting to 7 days when `rotation_time` is zero.
    pub fn rotation_interval(&self) -> Duration {
        let hours = if self.rotation_time == 0 {
            DEFAULT_ROTATION_HOURS
        } else {
            self.rotation_time
        };
        Duration::from_secs(hours.saturating_mul(SECONDS_PER_HOUR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_resolves() {
        let settings = Config::default().resolve();
        assert_eq!(settings.level, Level::Info);
        assert_eq!(settings.encoding, Encoding::Text);
        assert_eq!(settings.files, None);
        assert!(!settings.debug);
    }

    #[test]
    fn test_empty_fields_fall_back() {
        let config = Config {
            level: String::new(),
            formatter: String::new(),
            write: true,
            path: PathBuf::new(),
            file_name: String::new(),
            max_age: 0,
            rotation_count: 0,
            rotation_time: 0,
            debug: false,
        };

        let settings = config.resolve();
        assert_eq!(settings.level, Level::Info);
        assert_eq!(settings.encoding, Encoding::Text);
        let files = settings.files.unwrap();
        assert_eq!(files.dir, std::env::temp_dir());
        assert_eq!(files.file_name, DEFAULT_FILE_NAME);
        assert_eq!(files.retention, Retention::Forever);
        assert_eq!(files.rotation_interval, Duration::from_secs(168 * 3600));
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let config = Config {
            level: "verbose".to_string(),
            formatter: "xml".to_string(),
            ..Config::default()
        };
        let settings = config.resolve();
        assert_eq!(settings.level, Level::Debug);
        assert_eq!(settings.encoding, Encoding::Text);

        let config = Config {
            formatter: "json".to_string(),
            ..Config::default()
        };
        assert_eq!(config.resolve().encoding, Encoding::Json);
    }

    #[test]
    fn test_retention() {
        let config = Config {
            max_age: 24,
            rotation_count: 3,
            ..Config::default()
        };
        assert_eq!(
            config.retention(),
            Retention::MaxAge(Duration::from_secs(24 * 3600))
        );

        let config = Config {
            max_age: MAX_AGE_USE_COUNT,
            rotation_count: 3,
            ..Config::default()
        };
        assert_eq!(
            config.retention(),
            Retention::Count(NonZeroUsize::new(3).unwrap())
        );

        assert_eq!(Config::default().retention(), Retention::Forever);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let config: Config = serde_json::from_str(
            r#"{
                "level": "error",
                "formatter": "json",
                "write": true,
                "path": "/var/log/app",
                "fileName": "svc",
                "maxAge": -1,
                "rotationCount": 5,
                "rotationTime": 24,
                "debug": true
            }"#,
        )
        .unwrap();

        assert_eq!(
            config,
            Config {
                level: "error".to_string(),
                formatter: "json".to_string(),
                write: true,
                path: PathBuf::from("/var/log/app"),
                file_name: "svc".to_string(),
                max_age: -1,
                rotation_count: 5,
                rotation_time: 24,
                debug: true,
            }
        );

        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
