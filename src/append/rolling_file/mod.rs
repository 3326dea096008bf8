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

//! Appender for writing log records to time-bucketed rolling files.
//!
//! Files are named `<file_name>.<YYYYmmddHHMM>.log`, where the timestamp is the UTC start of
//! the bucket. Buckets are aligned to multiples of the rotation interval since the Unix epoch.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroUsize;
//! use std::time::Duration;
//!
//! use tierlog::Level;
//! use tierlog::Logger;
//! use tierlog::append::rolling_file::RollingFileBuilder;
//! use tierlog::config::Retention;
//! use tierlog::layout::JsonLayout;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let rolling = RollingFileBuilder::new(dir.path(), "app")
//!     .rotation_interval(Duration::from_secs(24 * 60 * 60))
//!     .retention(Retention::Count(NonZeroUsize::new(7).unwrap()))
//!     .layout(JsonLayout::default())
//!     .build()
//!     .unwrap();
//!
//! let logger = Logger::builder().max_level(Level::Info).append(rolling).build();
//! logger.info("This log will be written to a rolling file.", &[]);
//! ```

pub use append::RollingFile;
pub use append::RollingFileBuilder;
pub use rolling::RollingFileWriter;
pub use rolling::RollingFileWriterBuilder;
pub use rotation::Rotation;

mod append;
mod clock;
mod rolling;
mod rotation;
