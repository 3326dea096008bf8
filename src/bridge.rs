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

//! Forward records of the [`log`] crate macros to the default logger.

use crate::Level;
use crate::default_logger;

/// The environment variable [`setup_log_crate`] reads filter directives from.
pub const DEFAULT_FILTER_ENV: &str = "RUST_LOG";

/// Map a [`log::Level`] to a [`Level`]. `Trace` has no counterpart and maps to `Debug`.
pub fn level_from_log(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug | log::Level::Trace => Level::Debug,
    }
}

#[derive(Debug)]
struct LogCrateLogger {
    filter: Option<env_filter::Filter>,
}

impl log::Log for LogCrateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        if let Some(filter) = &self.filter {
            if !filter.enabled(metadata) {
                return false;
            }
        }

        default_logger().enabled(level_from_log(metadata.level()))
    }

    fn log(&self, record: &log::Record) {
        if let Some(filter) = &self.filter {
            if !filter.matches(record) {
                return;
            }
        }

        // log records carry no `Location`, so no caller is attached
        let level = level_from_log(record.level());
        default_logger().log_message(level, record.args().to_string(), None);
    }

    fn flush(&self) {
        default_logger().flush();
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] to set up a proxy that forwards every record of the
/// `log` macros to the [default logger](crate::default_logger). When `directives` is given,
/// it is parsed as a `RUST_LOG`-style filter (for example `info,hyper=warn`) and records it
/// rejects are dropped before reaching the logger.
///
/// The maximum level of the log crate is set to `Trace`; the default logger still applies its
/// own level gate.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// tierlog::bridge::try_setup_log_crate(Some("info")).unwrap();
/// log::info!("forwarded to tierlog");
/// ```
pub fn try_setup_log_crate(directives: Option<&str>) -> Result<(), log::SetLoggerError> {
    let filter = directives.map(|directives| {
        env_filter::Builder::new()
            .parse(directives)
            .build()
    });
    log::set_boxed_logger(Box::new(LogCrateLogger { filter }))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Set up the log crate global logger, filtered by the `RUST_LOG` environment variable if it
/// is set.
///
/// See [`try_setup_log_crate`].
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// tierlog::bridge::setup_log_crate();
/// log::warn!("forwarded to tierlog");
/// ```
pub fn setup_log_crate() {
    let directives = std::env::var(DEFAULT_FILTER_ENV).ok();
    try_setup_log_crate(directives.as_deref()).expect(
        "tierlog::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
