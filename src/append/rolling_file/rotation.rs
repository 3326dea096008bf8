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

use std::time::Duration;

use jiff::Timestamp;
use jiff::tz::TimeZone;

/// The `strftime` pattern embedded in bucket file names, rendered in UTC.
pub(crate) const DATE_FORMAT: &str = "%Y%m%d%H%M";

/// Number of digits [`DATE_FORMAT`] renders to.
pub(crate) const DATE_WIDTH: usize = 12;

/// A fixed-length rotation period.
///
/// Buckets start at multiples of the period since the Unix epoch, so a 24 hours rotation rolls
/// over at 00:00 UTC and a 168 hours rotation on Thursdays at 00:00 UTC.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Rotation {
    period: i64,
}

impl Rotation {
    /// Create a rotation of the given period, truncated to whole seconds and at least one second
    /// long.
    pub fn new(period: Duration) -> Self {
        let period = i64::try_from(period.as_secs()).unwrap_or(i64::MAX).max(1);
        Self { period }
    }

    /// The period in seconds.
    pub fn period_seconds(&self) -> i64 {
        self.period
    }

    /// The start of the bucket `now` falls into, in Unix seconds.
    pub fn bucket_start(&self, now: Timestamp) -> i64 {
        now.as_second().div_euclid(self.period) * self.period
    }

    /// The start of the bucket after the one `now` falls into, in Unix seconds.
    pub fn next_bucket_start(&self, now: Timestamp) -> i64 {
        self.bucket_start(now).saturating_add(self.period)
    }

    /// Render the start of a bucket the way it appears in file names.
    pub fn format_bucket(bucket_start: i64) -> anyhow::Result<String> {
        let start = Timestamp::from_second(bucket_start)?;
        Ok(start.to_zoned(TimeZone::UTC).strftime(DATE_FORMAT).to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::from_str(s).unwrap()
    }

    #[test]
    fn test_bucket_start() {
        let now = ts("2024-08-10T17:12:52Z");

        let hourly = Rotation::new(Duration::from_secs(60 * 60));
        assert_eq!(
            hourly.bucket_start(now),
            ts("2024-08-10T17:00:00Z").as_second()
        );
        assert_eq!(
            hourly.next_bucket_start(now),
            ts("2024-08-10T18:00:00Z").as_second()
        );

        let daily = Rotation::new(Duration::from_secs(24 * 60 * 60));
        assert_eq!(
            daily.bucket_start(now),
            ts("2024-08-10T00:00:00Z").as_second()
        );

        // 1970-01-01 was a Thursday
        let weekly = Rotation::new(Duration::from_secs(168 * 60 * 60));
        assert_eq!(
            weekly.bucket_start(now),
            ts("2024-08-08T00:00:00Z").as_second()
        );
        assert_eq!(
            weekly.next_bucket_start(now),
            ts("2024-08-15T00:00:00Z").as_second()
        );
    }

    #[test]
    fn test_sub_second_period_is_clamped() {
        let rotation = Rotation::new(Duration::from_millis(10));
        assert_eq!(rotation.period_seconds(), 1);
    }

    #[test]
    fn test_format_bucket() {
        let start = ts("2024-08-10T17:00:00Z").as_second();
        assert_eq!(Rotation::format_bucket(start).unwrap(), "202408101700");
        assert_eq!(Rotation::format_bucket(start).unwrap().len(), DATE_WIDTH);
    }
}
