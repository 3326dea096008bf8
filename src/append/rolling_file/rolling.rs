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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use jiff::Timestamp;

use crate::append::rolling_file::Rotation;
use crate::append::rolling_file::clock::Clock;
use crate::append::rolling_file::rotation::DATE_WIDTH;
use crate::config::DEFAULT_ROTATION_HOURS;
use crate::config::Retention;

/// A writer for time-bucketed rolling files.
#[derive(Debug)]
pub struct RollingFileWriter {
    state: State,
    writer: File,
}

impl RollingFileWriter {
    /// Creates a new [`RollingFileWriterBuilder`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tierlog::append::rolling_file::RollingFileWriter;
    ///
    /// let builder = RollingFileWriter::builder("logs", "app");
    /// ```
    #[must_use]
    pub fn builder(
        dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
    ) -> RollingFileWriterBuilder {
        RollingFileWriterBuilder::new(dir, file_name)
    }

    /// The path of the file currently written to.
    pub fn current_path(&self) -> &Path {
        &self.state.current_path
    }
}

impl Drop for RollingFileWriter {
    fn drop(&mut self) {
        if let Err(err) = self.writer.flush() {
            eprintln!("failed to flush rolling file writer on drop: {err}");
        }
    }
}

impl Write for RollingFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let now = self.state.clock.now();
        if self.state.should_rollover(now) {
            self.state.refresh_writer(now, &mut self.writer);
        }

        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// A builder for configuring [`RollingFileWriter`].
#[derive(Debug)]
pub struct RollingFileWriterBuilder {
    dir: PathBuf,
    file_name: String,
    rotation: Rotation,
    retention: Retention,
    clock: Clock,
}

impl RollingFileWriterBuilder {
    /// Creates a new [`RollingFileWriterBuilder`] writing `<dir>/<file_name>.<bucket>.log`.
    ///
    /// Defaults to a 7 days rotation that keeps every file.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            file_name: file_name.into(),
            rotation: Rotation::new(Duration::from_secs(DEFAULT_ROTATION_HOURS * 60 * 60)),
            retention: Retention::Forever,
            clock: Clock::System,
        }
    }

    /// Sets the length of a time bucket.
    #[must_use]
    pub fn rotation_interval(mut self, interval: Duration) -> Self {
        self.rotation = Rotation::new(interval);
        self
    }

    /// Sets which old files are removed when a new bucket starts.
    #[must_use]
    pub fn retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    #[cfg(test)]
    fn clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the [`RollingFileWriter`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file name is empty, the log directory cannot be created or the
    /// first bucket file cannot be opened.
    pub fn build(self) -> anyhow::Result<RollingFileWriter> {
        let Self {
            dir,
            file_name,
            rotation,
            retention,
            clock,
        } = self;

        if file_name.is_empty() {
            anyhow::bail!("log file name must not be empty");
        }
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

        let now = clock.now();
        let mut state = State {
            log_dir: dir,
            file_name,
            rotation,
            retention,
            current_path: PathBuf::new(),
            next_bucket_start: rotation.next_bucket_start(now),
            clock,
        };
        let writer = state.create_log_writer(now)?;
        Ok(RollingFileWriter { state, writer })
    }
}

#[derive(Debug)]
struct State {
    log_dir: PathBuf,
    file_name: String,
    rotation: Rotation,
    retention: Retention,
    current_path: PathBuf,
    next_bucket_start: i64,
    clock: Clock,
}

impl State {
    fn bucket_path(&self, bucket_start: i64) -> anyhow::Result<PathBuf> {
        let date = Rotation::format_bucket(bucket_start)?;
        Ok(self.log_dir.join(format!("{}.{date}.log", self.file_name)))
    }

    fn create_log_writer(&mut self, now: Timestamp) -> anyhow::Result<File> {
        let path = self.bucket_path(self.rotation.bucket_start(now))?;
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .with_context(|| format!("failed to create log file: {}", path.display()))?;
        self.current_path = path;

        if let Err(err) = self.delete_expired_logs(now) {
            eprintln!("failed to delete expired logs: {err:?}");
        }

        Ok(file)
    }

    // Returns true if `name` is `<file_name>.<12 digits>.log`.
    fn is_bucket_file(&self, name: &str) -> bool {
        let Some(rest) = name
            .strip_prefix(self.file_name.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
        else {
            return false;
        };
        let Some(date) = rest.strip_suffix(".log") else {
            return false;
        };
        date.len() == DATE_WIDTH && date.bytes().all(|b| b.is_ascii_digit())
    }

    fn delete_expired_logs(&self, now: Timestamp) -> anyhow::Result<()> {
        if self.retention == Retention::Forever {
            return Ok(());
        }

        let read_dir = fs::read_dir(&self.log_dir)
            .with_context(|| format!("failed to read log dir: {}", self.log_dir.display()))?;

        let mut files = read_dir
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let metadata = entry.metadata().ok()?;

                // The appender only creates files, never delete a dir or symlink.
                if !metadata.is_file() {
                    return None;
                }

                let path = entry.path();
                if path == self.current_path {
                    return None;
                }

                let filename = entry.file_name();
                let filename = filename.to_str()?;
                if !self.is_bucket_file(filename) {
                    return None;
                }

                let modified = metadata.modified().ok()?;
                Some((path, modified))
            })
            .collect::<Vec<_>>();

        let expired = match self.retention {
            Retention::Forever => return Ok(()),
            Retention::MaxAge(max_age) => {
                let cutoff = now
                    .checked_sub(jiff::SignedDuration::try_from(max_age)?)
                    .context("max age reaches before the minimum timestamp")?;
                files
                    .into_iter()
                    .filter(|(_, modified)| {
                        Timestamp::try_from(*modified).is_ok_and(|modified| modified < cutoff)
                    })
                    .map(|(path, _)| path)
                    .collect::<Vec<_>>()
            }
            Retention::Count(max_files) => {
                // the current file counts as one of the kept files
                let keep = max_files.get() - 1;
                if files.len() <= keep {
                    return Ok(());
                }
                // bucket names sort chronologically
                files.sort_by(|(a, _), (b, _)| a.cmp(b));
                let n = files.len() - keep;
                files.into_iter().take(n).map(|(path, _)| path).collect()
            }
        };

        for path in expired {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove old log file {}", path.display()))?;
        }

        Ok(())
    }

    fn refresh_writer(&mut self, now: Timestamp, file: &mut File) {
        self.next_bucket_start = self.rotation.next_bucket_start(now);
        match self.create_log_writer(now) {
            Ok(new_file) => {
                if let Err(err) = file.flush() {
                    eprintln!("failed to flush previous writer: {err}");
                }
                *file = new_file;
            }
            Err(err) => eprintln!("failed to create writer for logs: {err:?}"),
        }
    }

    fn should_rollover(&self, now: Timestamp) -> bool {
        now.as_second() >= self.next_bucket_start
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;
    use std::num::NonZeroUsize;
    use std::str::FromStr;
    use std::time::Duration;
    use std::time::SystemTime;

    use jiff::SignedDuration;
    use jiff::Timestamp;
    use rand::Rng;
    use rand::distr::Alphanumeric;
    use tempfile::TempDir;

    use super::*;

    const HOUR: Duration = Duration::from_secs(60 * 60);

    fn list_files(dir: &Path) -> Vec<String> {
        let mut files = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect::<Vec<_>>();
        files.sort();
        files
    }

    fn generate_random_string() -> String {
        let mut rng = rand::rng();
        let len = rng.random_range(50..=100);
        std::iter::repeat(())
            .map(|()| rng.sample(Alphanumeric))
            .map(char::from)
            .take(len)
            .collect()
    }

    #[test]
    fn test_bucket_file_name() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let start = Timestamp::from_str("2024-08-10T17:12:52Z").unwrap();

        let writer = RollingFileWriterBuilder::new(temp_dir.path(), "app")
            .rotation_interval(HOUR)
            .clock(Clock::Manual(start))
            .build()
            .unwrap();

        assert_eq!(
            writer.current_path(),
            temp_dir.path().join("app.202408101700.log")
        );
        assert_eq!(list_files(temp_dir.path()), vec!["app.202408101700.log"]);
    }

    #[test]
    fn test_file_rolling_via_time_rotation() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let start = Timestamp::from_str("2024-08-10T00:00:00Z").unwrap();

        let mut writer = RollingFileWriterBuilder::new(temp_dir.path(), "app")
            .rotation_interval(HOUR)
            .clock(Clock::Manual(start))
            .build()
            .unwrap();

        let mut expected = Vec::new();
        for hour in 0..5 {
            expected.push(format!("app.20240810{hour:02}00.log"));
            for _ in 0..6 {
                let payload = generate_random_string();
                assert_eq!(writer.write(payload.as_bytes()).unwrap(), payload.len());
                writer.state.clock.advance(SignedDuration::from_mins(10));
            }
        }
        writer.flush().unwrap();

        assert_eq!(list_files(temp_dir.path()), expected);
    }

    #[test]
    fn test_count_retention() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let start = Timestamp::from_str("2024-08-10T00:00:00Z").unwrap();
        let max_files = 3;

        let mut writer = RollingFileWriterBuilder::new(temp_dir.path(), "app")
            .rotation_interval(HOUR)
            .retention(Retention::Count(NonZeroUsize::new(max_files).unwrap()))
            .clock(Clock::Manual(start))
            .build()
            .unwrap();

        // unrelated files are never touched
        fs::write(temp_dir.path().join("app.out"), "keep").unwrap();
        fs::write(temp_dir.path().join("other.202301010000.log"), "keep").unwrap();

        for i in 1..=10 {
            writer.write_all(b"line\n").unwrap();
            writer.flush().unwrap();

            let buckets = list_files(temp_dir.path())
                .into_iter()
                .filter(|name| name.starts_with("app.2024"))
                .count();
            assert_eq!(buckets, i.min(max_files));

            writer.state.clock.advance(SignedDuration::from_hours(1));
        }

        let files = list_files(temp_dir.path());
        assert!(files.contains(&"app.out".to_string()));
        assert!(files.contains(&"other.202301010000.log".to_string()));
        assert!(files.contains(&"app.202408100900.log".to_string()));
        assert!(!files.contains(&"app.202408100600.log".to_string()));
    }

    #[test]
    fn test_max_age_retention() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");

        let stale = temp_dir.path().join("app.202001010000.log");
        let file = fs::File::create(&stale).unwrap();
        file.set_modified(SystemTime::now() - 48 * HOUR).unwrap();
        drop(file);

        let fresh = temp_dir.path().join("app.202001020000.log");
        fs::write(&fresh, "fresh").unwrap();

        let writer = RollingFileWriterBuilder::new(temp_dir.path(), "app")
            .rotation_interval(HOUR)
            .retention(Retention::MaxAge(24 * HOUR))
            .build()
            .unwrap();

        assert!(!stale.exists());
        assert!(fresh.exists());
        assert!(writer.current_path().exists());
    }

    #[test]
    fn test_is_bucket_file() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        let writer = RollingFileWriterBuilder::new(temp_dir.path(), "app")
            .build()
            .unwrap();

        assert!(writer.state.is_bucket_file("app.202408101700.log"));
        assert!(!writer.state.is_bucket_file("app.out"));
        assert!(!writer.state.is_bucket_file("app.2024081017.log"));
        assert!(!writer.state.is_bucket_file("apple.202408101700.log"));
        assert!(!writer.state.is_bucket_file("app.202408101700.log.bak"));
    }

    #[test]
    fn test_empty_file_name_is_rejected() {
        let temp_dir = TempDir::new().expect("failed to create a temporary directory");
        assert!(
            RollingFileWriterBuilder::new(temp_dir.path(), "")
                .build()
                .is_err()
        );
    }
}
