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

//! The process-wide default logger and the free functions that dispatch to it.

use std::fmt::Display;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::RwLock;

use crate::Config;
use crate::Level;
use crate::Logger;
use crate::append::Console;
use crate::format::Head;

static DEFAULT_LOGGER: RwLock<Option<Arc<Logger>>> = RwLock::new(None);

/// Build a logger from `config` and install it as the default logger.
///
/// `None` means [`Config::default()`]. Calling it again replaces the default logger; calls
/// already in flight finish on the logger they started with.
///
/// # Errors
///
/// Returns an error if file output is enabled and the log directory or the first bucket file
/// cannot be created. The previous default logger stays in place.
///
/// # Examples
///
/// ```
/// let logger = tierlog::init(None).unwrap();
/// logger.info("ready", &[]);
/// tierlog::info("also ready", &[]);
/// ```
pub fn init(config: Option<Config>) -> anyhow::Result<Arc<Logger>> {
    let config = config.unwrap_or_default();
    let logger = Logger::from_config(&config)?;
    Ok(set_default_logger(logger))
}

/// Install `logger` as the default logger, returning the shared handle.
///
/// The replaced logger is flushed.
pub fn set_default_logger(logger: Logger) -> Arc<Logger> {
    let logger = Arc::new(logger);
    let previous = DEFAULT_LOGGER
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .replace(logger.clone());
    if let Some(previous) = previous {
        previous.flush();
    }
    logger
}

/// The default logger.
///
/// Before [`init`] or [`set_default_logger`] is called, this is a console-only logger built
/// from [`Config::default()`].
pub fn default_logger() -> Arc<Logger> {
    let installed = DEFAULT_LOGGER
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone();
    installed.unwrap_or_else(fallback_logger)
}

fn fallback_logger() -> Arc<Logger> {
    static FALLBACK: OnceLock<Arc<Logger>> = OnceLock::new();
    FALLBACK
        .get_or_init(|| {
            let settings = Config::default().resolve();
            Arc::new(
                Logger::builder()
                    .max_level(settings.level)
                    .append(Console::default())
                    .build(),
            )
        })
        .clone()
}

/// Log at `level` through the default logger.
#[track_caller]
pub fn log<'a>(level: Level, head: impl Into<Head<'a>>, args: &[&dyn Display]) {
    default_logger().log(level, head, args);
}

/// Log a line at `level` through the default logger.
#[track_caller]
pub fn logln(level: Level, args: &[&dyn Display]) {
    default_logger().logln(level, args);
}

macro_rules! level_functions {
    ($($(#[$attr:meta])* $name:ident, $name_ln:ident;)*) => {
        $(
            $(#[$attr])*
            #[track_caller]
            pub fn $name<'a>(head: impl Into<Head<'a>>, args: &[&dyn Display]) {
                default_logger().$name(head, args);
            }

            $(#[$attr])*
            ///
            /// Values are joined with spaces and followed by a newline.
            #[track_caller]
            pub fn $name_ln(args: &[&dyn Display]) {
                default_logger().$name_ln(args);
            }
        )*
    };
}

level_functions! {
    /// Log at [`Level::Debug`] through the default logger.
    debug, debugln;
    /// Log at [`Level::Info`] through the default logger.
    info, infoln;
    /// Log at [`Level::Warn`] through the default logger.
    warn, warnln;
    /// Log at [`Level::Error`] through the default logger.
    error, errorln;
    /// Log at [`Level::Fatal`] through the default logger, flush it and terminate the process.
    fatal, fatalln;
    /// Log at [`Level::Panic`] through the default logger and panic with the message.
    panic, panicln;
    /// Log at [`Level::Info`] through the default logger.
    print, println;
}

/// Log at [`Level::Info`] through the default logger. Same as [`print`].
#[track_caller]
pub fn printf<'a>(head: impl Into<Head<'a>>, args: &[&dyn Display]) {
    default_logger().printf(head, args);
}
