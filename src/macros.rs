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

/// Logs a message at the debug level.
///
/// The first expression is the message head; the rest are its trailing values. Pass
/// `logger: <expr>` first to log through a specific [`Logger`](crate::Logger) instead of the
/// default one.
///
/// # Examples
///
/// ```
/// use tierlog::Level;
/// use tierlog::Logger;
/// use tierlog::append::Testing;
///
/// let captured = Testing::default();
/// let logger = Logger::builder()
///     .max_level(Level::Debug)
///     .append(captured.clone())
///     .build();
///
/// tierlog::debug!(logger: logger, "cache %s: %d entries", "users", 12);
/// assert_eq!(captured.messages(), vec!["cache users: 12 entries"]);
///
/// tierlog::debug!("sent to the default logger");
/// ```
#[macro_export]
macro_rules! debug {
    (logger: $logger:expr, $head:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug($head, &[$(&$arg),*])
    };
    ($head:expr $(, $arg:expr)* $(,)?) => {
        $crate::debug($head, &[$(&$arg),*])
    };
}

/// Logs a message at the info level.
///
/// See [`debug!`] for the accepted arguments.
///
/// # Examples
///
/// ```
/// let port = 8080;
/// tierlog::info!("listening on %d", port);
/// ```
#[macro_export]
macro_rules! info {
    (logger: $logger:expr, $head:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($head, &[$(&$arg),*])
    };
    ($head:expr $(, $arg:expr)* $(,)?) => {
        $crate::info($head, &[$(&$arg),*])
    };
}

/// Logs a message at the warn level.
///
/// See [`debug!`] for the accepted arguments.
///
/// # Examples
///
/// ```
/// let used = 93;
/// tierlog::warn!("disk usage at %d%%", used);
/// ```
#[macro_export]
macro_rules! warn {
    (logger: $logger:expr, $head:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn($head, &[$(&$arg),*])
    };
    ($head:expr $(, $arg:expr)* $(,)?) => {
        $crate::warn($head, &[$(&$arg),*])
    };
}

/// Logs a message at the error level.
///
/// See [`debug!`] for the accepted arguments.
///
/// # Examples
///
/// ```
/// let err = std::io::Error::other("connection reset");
/// tierlog::error!("request failed:", err);
/// ```
#[macro_export]
macro_rules! error {
    (logger: $logger:expr, $head:expr $(, $arg:expr)* $(,)?) => {
        $logger.error($head, &[$(&$arg),*])
    };
    ($head:expr $(, $arg:expr)* $(,)?) => {
        $crate::error($head, &[$(&$arg),*])
    };
}

/// Logs a message at the fatal level, flushes the logger and terminates the process.
///
/// See [`debug!`] for the accepted arguments.
///
/// # Examples
///
/// ```no_run
/// tierlog::fatal!("cannot bind to %s", "0.0.0.0:80");
/// ```
#[macro_export]
macro_rules! fatal {
    (logger: $logger:expr, $head:expr $(, $arg:expr)* $(,)?) => {
        $logger.fatal($head, &[$(&$arg),*])
    };
    ($head:expr $(, $arg:expr)* $(,)?) => {
        $crate::fatal($head, &[$(&$arg),*])
    };
}
