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

use std::io::Write;

use crate::Level;
use crate::LevelFilter;
use crate::append::Append;
use crate::record::Record;

/// A grouped set of appenders and level filters.
///
/// The [`Logger`](crate::Logger) passes every record that clears its level gate to each
/// [`Dispatch`]. A dispatch forwards the record to its appenders, in order, if every filter
/// accepts the record's level.
#[derive(Debug)]
pub(super) struct Dispatch {
    filters: Vec<LevelFilter>,
    appends: Vec<Box<dyn Append>>,
}

impl Dispatch {
    pub(super) fn new(filters: Vec<LevelFilter>, appends: Vec<Box<dyn Append>>) -> Self {
        debug_assert!(
            !appends.is_empty(),
            "A Dispatch must have at least one append"
        );

        Self { filters, appends }
    }

    fn enabled(&self, level: Level) -> bool {
        self.filters.iter().all(|filter| filter.test(level))
    }

    // A failing append is reported and does not stop the others.
    pub(super) fn log(&self, record: &Record) {
        if !self.enabled(record.level()) {
            return;
        }

        for append in &self.appends {
            if let Err(err) = append.append(record) {
                handle_log_error(record, err);
            }
        }
    }

    pub(super) fn flush(&self) {
        for append in &self.appends {
            if let Err(err) = append.flush() {
                handle_flush_error(err);
            }
        }
    }
}

fn handle_log_error(record: &Record, error: anyhow::Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform logging.
    Attempted to log: {message}
    Record: {record:?}
    Error: {error:?}
"###,
        message = record.message(),
        record = record,
        error = error,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular logging.
    Attempted to log: {message}
    Record: {record:?}
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
        message = record.message(),
        record = record,
        error = error,
        fallback_error = fallback_error,
    );
}

fn handle_flush_error(error: anyhow::Error) {
    let Err(fallback_error) = write!(
        std::io::stderr(),
        r###"
Error perform flush.
    Error: {error:?}
"###,
    ) else {
        return;
    };

    panic!(
        r###"
Error performing stderr logging after error occurred during regular flush.
    Error: {error:?}
    Fallback error: {fallback_error}
"###,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::append::Testing;

    #[derive(Debug)]
    struct Broken;

    impl Append for Broken {
        fn append(&self, _: &Record) -> anyhow::Result<()> {
            anyhow::bail!("sink is gone")
        }
    }

    #[test]
    fn test_failing_append_does_not_stop_others() {
        let captured = Testing::default();
        let appends: Vec<Box<dyn Append>> = vec![Broken.into(), captured.clone().into()];
        let dispatch = Dispatch::new(vec![], appends);

        dispatch.log(&Record::new(Level::Info, "still delivered"));
        assert_eq!(captured.messages(), vec!["still delivered".to_string()]);
    }

    #[test]
    fn test_filters_scope_the_dispatch() {
        let captured = Testing::default();
        let dispatch = Dispatch::new(
            vec![LevelFilter::NotEqual(Level::Panic)],
            vec![captured.clone().into()],
        );

        dispatch.log(&Record::new(Level::Panic, "dropped"));
        dispatch.log(&Record::new(Level::Fatal, "kept"));
        assert_eq!(captured.messages(), vec!["kept".to_string()]);
    }
}
