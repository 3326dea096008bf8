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

use crate::Level;
use crate::LevelFilter;
use crate::Logger;
use crate::append::Append;
use crate::logger::dispatch::Dispatch;
use crate::logger::exit_process;

/// A builder for configuring a [`Logger`]. See also [`Logger::builder`].
///
/// * `READY=false`: The initialized state. You can configure [`LevelFilter`]s and [`Append`]s
///   for the current staging dispatch. Once at least one append is configured, the builder
///   transit to `READY=true`.
/// * `READY=true`: The builder can be [built][Builder::build] into a logger. Or, you can start a
///   new staging dispatch by calling [dispatch][Builder::dispatch].
///
/// ## Examples
///
/// Send everything to the console, and only errors to stderr:
///
/// ```rust
/// use tierlog::Level;
/// use tierlog::LevelFilter;
/// use tierlog::Logger;
/// use tierlog::append;
///
/// let logger = Logger::builder()
///     .max_level(Level::Debug)
///     .append(append::Console::default())
///     .dispatch()
///     .filter(LevelFilter::MoreSevereEqual(Level::Error))
///     .append(append::Console::stderr())
///     .build();
/// ```
#[must_use = "call `dispatch` to add a dispatch to the logger and `build` to create the logger"]
#[derive(Debug)]
pub struct Builder<const READY: bool = true> {
    // for current dispatch
    filters: Vec<LevelFilter>,
    appends: Vec<Box<dyn Append>>,

    // stashed dispatches
    dispatches: Vec<Dispatch>,

    max_level: Level,
    caller: bool,
    exit: fn(i32),
}

impl Default for Builder<false> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const READY: bool> Builder<READY> {
    /// Add an [`Append`] to the under constructing `Dispatch`.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Builder<true> {
        self.appends.push(append.into());

        Builder {
            filters: self.filters,
            appends: self.appends,
            dispatches: self.dispatches,
            max_level: self.max_level,
            caller: self.caller,
            exit: self.exit,
        }
    }

    /// Set the most verbose level the logger emits. Defaults to [`Level::Info`].
    pub fn max_level(mut self, max_level: Level) -> Self {
        self.max_level = max_level;
        self
    }

    /// Capture the `file:line` of every log call. Disabled by default.
    pub fn caller(mut self, caller: bool) -> Self {
        self.caller = caller;
        self
    }

    /// Replace the function a fatal call terminates the process with.
    ///
    /// It receives the exit code. Defaults to [`std::process::exit`].
    pub fn exit_hook(mut self, exit: fn(i32)) -> Self {
        self.exit = exit;
        self
    }
}

impl Builder<false> {
    /// Create a new empty [`Builder`].
    pub fn new() -> Self {
        Self {
            filters: vec![],
            appends: vec![],
            dispatches: vec![],
            max_level: Level::Info,
            caller: false,
            exit: exit_process,
        }
    }

    /// Add a [`LevelFilter`] to the under constructing `Dispatch`.
    pub fn filter(mut self, filter: LevelFilter) -> Builder<false> {
        self.filters.push(filter);
        self
    }
}

impl Builder<true> {
    /// Construct a new `Dispatch` with the configured [`LevelFilter`]s and [`Append`]s.
    pub fn dispatch(mut self) -> Builder<false> {
        let dispatch = Dispatch::new(self.filters, self.appends);
        self.dispatches.push(dispatch);

        Builder {
            filters: vec![],
            appends: vec![],
            dispatches: self.dispatches,
            max_level: self.max_level,
            caller: self.caller,
            exit: self.exit,
        }
    }

    /// Build the [`Logger`] with all the dispatches configured.
    pub fn build(mut self) -> Logger {
        // finish the current staging dispatch
        let dispatch = Dispatch::new(self.filters, self.appends);
        self.dispatches.push(dispatch);

        Logger::new(self.max_level, self.caller, self.exit, self.dispatches)
    }
}
