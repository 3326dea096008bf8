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

//! Log record.

use std::panic::Location;

use jiff::Timestamp;

use crate::Level;

/// The payload of a log message.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    // the observed time
    now: Timestamp,
    level: Level,
    // only captured when the logger runs in debug mode
    location: Option<&'static Location<'static>>,
    message: &'a str,
}

impl<'a> Record<'a> {
    /// Create a record observed now.
    pub fn new(level: Level, message: &'a str) -> Self {
        Self {
            now: Timestamp::now(),
            level,
            location: None,
            message,
        }
    }

    /// Attach the call site of the log call.
    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    /// Override the observed time.
    pub fn with_time(mut self, now: Timestamp) -> Self {
        self.now = now;
        self
    }

    /// The observed time.
    pub fn time(&self) -> Timestamp {
        self.now
    }

    /// The severity of the message.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The formatted message.
    pub fn message(&self) -> &'a str {
        self.message
    }

    /// The call site, if caller capture is enabled.
    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.location
    }

    /// The call site as `file:line`, if caller capture is enabled.
    pub fn caller(&self) -> Option<String> {
        self.location
            .map(|location| format!("{}:{}", location.file(), location.line()))
    }
}
