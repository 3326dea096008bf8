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

//! An example of logging to the console through the default logger.

use tierlog::Config;
use tierlog::Head;

fn main() {
    let config = Config {
        level: "debug".to_string(),
        debug: true,
        ..Config::default()
    };
    tierlog::init(Some(config)).unwrap();

    tierlog::error("Hello error!", &[]);
    tierlog::warn("Hello %s!", &[&"warn"]);
    tierlog::info("Hello", &[&"info", &1]);
    tierlog::debug(Head::value(3.5), &[&"is a value head"]);
    tierlog::infoln(&[&"one", &"line", &"per", &"call"]);
    tierlog::info!("macro %v", "form");
}
