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

use jiff::Timestamp;

/// The time source of a rolling writer. Tests drive it by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    System,
    #[cfg(test)]
    Manual(Timestamp),
}

impl Clock {
    pub fn now(&self) -> Timestamp {
        match self {
            Clock::System => Timestamp::now(),
            #[cfg(test)]
            Clock::Manual(now) => *now,
        }
    }

    /// Moves a manual clock forward; no-op on the system clock.
    #[cfg(test)]
    pub fn advance(&mut self, by: jiff::SignedDuration) {
        if let Clock::Manual(now) = self {
            *now = now.checked_add(by).unwrap_or(Timestamp::MAX);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use jiff::SignedDuration;

    use super::*;

    #[test]
    fn test_manual_clock_only_moves_when_advanced() {
        let start = Timestamp::from_str("2024-08-10T00:00:00Z").unwrap();
        let mut clock = Clock::Manual(start);
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);

        clock.advance(SignedDuration::from_mins(90));
        assert_eq!(
            clock.now(),
            Timestamp::from_str("2024-08-10T01:30:00Z").unwrap()
        );
    }
}
