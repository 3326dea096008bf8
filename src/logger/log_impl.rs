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

use std::fmt::Display;
use std::panic::Location;

use crate::Config;
use crate::Level;
use crate::LevelFilter;
use crate::append::Append;
use crate::append::Console;
use crate::append::RollingFile;
use crate::append::RoutedFile;
use crate::append::SeverityRouter;
use crate::append::rolling_file::RollingFileBuilder;
use crate::format::Head;
use crate::format::format_line;
use crate::format::format_message;
use crate::layout::file_layout;
use crate::logger::builder::Builder;
use crate::logger::dispatch::Dispatch;
use crate::record::Record;

/// The exit code a fatal call terminates the process with.
pub const FATAL_EXIT_CODE: i32 = 1;

/// A logger that gates records by level and dispatches them to one or more dispatches.
///
/// Every convenience method takes a [`Head`] and a slice of trailing values; see
/// [`format_message`] for how they are combined. The `*ln` variants join their values with
/// spaces and append a newline instead.
///
/// Fatal calls write the record, flush every appender and terminate the process, even when
/// the level gate drops the record. Panic calls are never gated; they write the record and
/// then panic with the message.
#[derive(Debug)]
pub struct Logger {
    max_level: Level,
    caller: bool,
    exit: fn(i32),
    dispatches: Vec<Dispatch>,
}

impl Logger {
    pub(super) fn new(
        max_level: Level,
        caller: bool,
        exit: fn(i32),
        dispatches: Vec<Dispatch>,
    ) -> Self {
        Self {
            max_level,
            caller,
            exit,
            dispatches,
        }
    }

    /// Create a new [`Builder`].
    pub fn builder() -> Builder<false> {
        Builder::new()
    }

    /// Build a logger from a configuration.
    ///
    /// The console always receives records. When `write` is enabled, the time-bucketed file
    /// receives every record but Panic, and the `.out`/`.err` files receive the records routed
    /// to them by [`SeverityRouter`].
    ///
    /// # Errors
    ///
    /// Returns an error if the log directory or the first bucket file cannot be created.
    pub fn from_config(config: &Config) -> anyhow::Result<Logger> {
        Self::from_config_with_console(config, Console::default())
    }

    fn from_config_with_console(
        config: &Config,
        console: impl Into<Box<dyn Append>>,
    ) -> anyhow::Result<Logger> {
        let settings = config.resolve();

        let mut builder = Logger::builder()
            .max_level(settings.level)
            .caller(settings.debug)
            .append(console);

        if let Some(files) = settings.files {
            let rolling: RollingFile = RollingFileBuilder::new(&files.dir, &files.file_name)
                .rotation_interval(files.rotation_interval)
                .retention(files.retention)
                .layout(file_layout(settings.encoding))
                .build()?;
            let routed = RoutedFile::new(SeverityRouter::new(&files.dir, &files.file_name))
                .with_layout(file_layout(settings.encoding));

            builder = builder
                .dispatch()
                .filter(LevelFilter::NotEqual(Level::Panic))
                .append(rolling)
                .append(routed);
        }

        Ok(builder.build())
    }

    /// The most verbose level this logger emits.
    pub fn max_level(&self) -> Level {
        self.max_level
    }

    /// Whether a record at `level` passes the level gate.
    pub fn enabled(&self, level: Level) -> bool {
        level == Level::Panic || level.enabled_under(self.max_level)
    }

    /// Flush every appender.
    pub fn flush(&self) {
        for dispatch in &self.dispatches {
            dispatch.flush();
        }
    }

    /// Log a message at `level`.
    #[track_caller]
    pub fn log<'a>(&self, level: Level, head: impl Into<Head<'a>>, args: &[&dyn Display]) {
        let location = Location::caller();
        self.emit(level, location, || format_message(head.into(), args));
    }

    /// Log a line at `level`.
    #[track_caller]
    pub fn logln(&self, level: Level, args: &[&dyn Display]) {
        let location = Location::caller();
        self.emit(level, location, || format_line(args));
    }

    /// Log an already composed message, with an optional call site.
    pub(crate) fn log_message(
        &self,
        level: Level,
        message: String,
        location: Option<&'static Location<'static>>,
    ) {
        if self.enabled(level) {
            self.write(level, &message, location);
        }
    }

    fn emit(
        &self,
        level: Level,
        location: &'static Location<'static>,
        message: impl FnOnce() -> String,
    ) {
        match level {
            Level::Panic => {
                let message = message();
                self.write(level, &message, Some(location));
                self.flush();
                panic!("{message}");
            }
            Level::Fatal => {
                if self.enabled(level) {
                    let message = message();
                    self.write(level, &message, Some(location));
                }
                self.flush();
                (self.exit)(FATAL_EXIT_CODE);
            }
            _ => {
                if self.enabled(level) {
                    let message = message();
                    self.write(level, &message, Some(location));
                }
            }
        }
    }

    fn write(&self, level: Level, message: &str, location: Option<&'static Location<'static>>) {
        let mut record = Record::new(level, message);
        if self.caller {
            if let Some(location) = location {
                record = record.with_location(location);
            }
        }

        for dispatch in &self.dispatches {
            dispatch.log(&record);
        }
    }
}

macro_rules! level_methods {
    ($($(#[$attr:meta])* $name:ident, $name_ln:ident => $level:expr;)*) => {
        impl Logger {
            $(
                $(#[$attr])*
                #[track_caller]
                pub fn $name<'a>(&self, head: impl Into<Head<'a>>, args: &[&dyn Display]) {
                    self.log($level, head, args);
                }

                $(#[$attr])*
                ///
                /// Values are joined with spaces and followed by a newline.
                #[track_caller]
                pub fn $name_ln(&self, args: &[&dyn Display]) {
                    self.logln($level, args);
                }
            )*
        }
    };
}

level_methods! {
    /// Log at [`Level::Debug`].
    debug, debugln => Level::Debug;
    /// Log at [`Level::Info`].
    info, infoln => Level::Info;
    /// Log at [`Level::Warn`].
    warn, warnln => Level::Warn;
    /// Log at [`Level::Error`].
    error, errorln => Level::Error;
    /// Log at [`Level::Fatal`], flush every appender and terminate the process.
    fatal, fatalln => Level::Fatal;
    /// Log at [`Level::Panic`] and panic with the message.
    panic, panicln => Level::Panic;
    /// Log at [`Level::Info`].
    print, println => Level::Info;
}

impl Logger {
    /// Log at [`Level::Info`]. Same as [`Logger::print`].
    #[track_caller]
    pub fn printf<'a>(&self, head: impl Into<Head<'a>>, args: &[&dyn Display]) {
        self.log(Level::Info, head, args);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicI32;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::append::Testing;

    fn capture(max_level: Level) -> (Logger, Testing) {
        let captured = Testing::default();
        let logger = Logger::builder()
            .max_level(max_level)
            .append(captured.clone())
            .build();
        (logger, captured)
    }

    #[test]
    fn test_level_gate() {
        let (logger, captured) = capture(Level::Warn);

        logger.debug("dropped", &[]);
        logger.info("dropped", &[]);
        logger.warn("kept %d", &[&1]);
        logger.error("kept", &[&2]);

        assert_eq!(
            captured.records(),
            vec![
                (Level::Warn, "kept 1".to_string()),
                (Level::Error, "kept 2".to_string()),
            ]
        );
    }

    #[test]
    fn test_print_variants_emit_info() {
        let (logger, captured) = capture(Level::Info);

        logger.print("a", &[]);
        logger.printf("b %s", &[&"c"]);
        logger.println(&[&"d", &5]);

        assert_eq!(
            captured.records(),
            vec![
                (Level::Info, "a".to_string()),
                (Level::Info, "b c".to_string()),
                (Level::Info, "d 5\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_value_head() {
        let (logger, captured) = capture(Level::Debug);

        logger.info(42, &[&"apples"]);
        logger.info(Head::value("100%"), &[&"sure"]);

        assert_eq!(captured.messages(), vec!["42 apples", "100% sure"]);
    }

    #[test]
    fn test_fatal_calls_exit_hook_even_when_gated() {
        static EXIT_CODE: AtomicI32 = AtomicI32::new(0);
        fn record_exit(code: i32) {
            EXIT_CODE.store(code, Ordering::SeqCst);
        }

        let captured = Testing::default();
        let logger = Logger::builder()
            .max_level(Level::Panic)
            .append(captured.clone())
            .exit_hook(record_exit)
            .build();

        logger.fatal("shutting down", &[]);
        assert_eq!(EXIT_CODE.load(Ordering::SeqCst), FATAL_EXIT_CODE);
        assert!(captured.records().is_empty());
    }

    #[test]
    fn test_fatal_is_written_before_exit() {
        static EXIT_CODE: AtomicI32 = AtomicI32::new(0);
        fn record_exit(code: i32) {
            EXIT_CODE.store(code, Ordering::SeqCst);
        }

        let captured = Testing::default();
        let logger = Logger::builder()
            .append(captured.clone())
            .exit_hook(record_exit)
            .build();

        logger.fatalln(&[&"bye"]);
        assert_eq!(EXIT_CODE.load(Ordering::SeqCst), FATAL_EXIT_CODE);
        assert_eq!(captured.records(), vec![(Level::Fatal, "bye\n".to_string())]);
    }

    #[test]
    fn test_panic_is_never_gated() {
        let captured = Testing::default();
        let logger = Logger::builder()
            .max_level(Level::Panic)
            .append(captured.clone())
            .build();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("broken %v", &[&"invariant"]);
        }));

        let payload = result.unwrap_err();
        assert_eq!(
            payload.downcast_ref::<String>().map(String::as_str),
            Some("broken invariant")
        );
        assert_eq!(
            captured.records(),
            vec![(Level::Panic, "broken invariant".to_string())]
        );
    }

    #[test]
    #[should_panic(expected = "gone")]
    fn test_panicln_panics() {
        let (logger, _captured) = capture(Level::Info);
        logger.panicln(&[&"gone"]);
    }

    #[test]
    fn test_configured_console_receives_every_record() {
        let temp_dir = tempfile::tempdir().expect("failed to create a temporary directory");
        let config = Config {
            write: true,
            path: temp_dir.path().to_path_buf(),
            file_name: "svc".to_string(),
            ..Config::default()
        };
        let console = Testing::default();
        let logger = Logger::from_config_with_console(&config, console.clone()).unwrap();

        logger.warn("disk %d%% full", &[&91]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            logger.panic("lost quorum", &[]);
        }));
        assert!(result.is_err());
        logger.flush();

        assert_eq!(
            console.records(),
            vec![
                (Level::Warn, "disk 91% full".to_string()),
                (Level::Panic, "lost quorum".to_string()),
            ]
        );

        let out = std::fs::read_to_string(temp_dir.path().join("svc.out")).unwrap();
        assert!(out.contains("disk 91% full"), "{out}");
        assert!(!out.contains("lost quorum"), "{out}");

        let buckets = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "log"))
            .collect::<Vec<_>>();
        assert_eq!(buckets.len(), 1, "{buckets:?}");
        let bucket = std::fs::read_to_string(&buckets[0]).unwrap();
        assert!(bucket.contains("disk 91% full"), "{bucket}");
        assert!(!bucket.contains("lost quorum"), "{bucket}");
    }
}
