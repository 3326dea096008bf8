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

//! Tierlog is a severity-tiered logging facade: one call writes a colored line to the console
//! and, optionally, to a time-bucketed rotating file and to an `.out` or `.err` file picked by
//! the severity of the record.
//!
//! # Overview
//!
//! There are six levels, from the most to the least severe: panic, fatal, error, warn, info
//! and debug. Fatal calls terminate the process after flushing every appender; panic calls
//! panic after logging.
//!
//! Each call takes a message head and a slice of trailing values. A head containing `%`
//! directives is a template; otherwise the values are appended, separated by spaces. See
//! [`format_message`](format::format_message) for the details.
//!
//! # Examples
//!
//! Log through the default logger, configured from a [`Config`]:
//!
//! ```
//! use tierlog::Config;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = Config {
//!     level: "debug".to_string(),
//!     write: true,
//!     path: dir.path().to_path_buf(),
//!     file_name: "service".to_string(),
//!     ..Config::default()
//! };
//! tierlog::init(Some(config)).unwrap();
//!
//! tierlog::info("listening on %s:%d", &[&"0.0.0.0", &8080]);
//! tierlog::warnln(&[&"retrying in", &3, &"seconds"]);
//! tierlog::error!("request failed:", "connection reset");
//! ```
//!
//! Or build a logger instance by hand:
//!
//! ```
//! use tierlog::Level;
//! use tierlog::Logger;
//! use tierlog::append;
//!
//! let logger = Logger::builder()
//!     .max_level(Level::Debug)
//!     .append(append::Console::stderr())
//!     .build();
//!
//! logger.debug("cache warmed up in %vms", &[&42]);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod color;
pub mod config;
pub mod format;
pub mod layout;

#[cfg(feature = "bridge-log")]
pub mod bridge;

mod global;
mod level;
mod logger;
mod macros;
mod record;

pub use self::append::Append;
pub use self::config::Config;
pub use self::format::Head;
pub use self::global::*;
pub use self::layout::Layout;
pub use self::level::Level;
pub use self::level::LevelFilter;
pub use self::level::ParseLevelError;
pub use self::logger::Builder;
pub use self::logger::FATAL_EXIT_CODE;
pub use self::logger::Logger;
pub use self::record::Record;
