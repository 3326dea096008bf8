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

//! An example of writing a rotating JSON file plus `.out`/`.err` files under `logs/`.

use tierlog::Config;

fn main() {
    let config = Config {
        level: "debug".to_string(),
        formatter: "json".to_string(),
        write: true,
        path: "logs".into(),
        file_name: "my_app".to_string(),
        max_age: tierlog::config::MAX_AGE_USE_COUNT,
        rotation_count: 7,
        rotation_time: 24,
        ..Config::default()
    };
    let logger = tierlog::init(Some(config)).unwrap();

    let repeat = 1;

    for i in 0..repeat {
        tierlog::error("Hello error!", &[]);
        tierlog::warn("Hello warn!", &[]);
        tierlog::info("Hello info!", &[]);
        tierlog::debug("Hello debug!", &[]);

        if i + 1 < repeat {
            std::thread::sleep(std::time::Duration::from_secs(10));
        }
    }

    logger.flush();
}
